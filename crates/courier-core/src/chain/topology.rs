// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Orders single-parent declarations so that every parent precedes its
//! children, and rejects parent links that loop.

/// Parent links looped back on themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CycleError {
    /// Positions caught in, or only reachable through, a loop, ascending.
    pub(crate) remaining: Vec<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    /// On the path currently being walked.
    Walking,
    Placed,
    Looping,
}

/// Orders positions `0..parents.len()` parent-first.
///
/// `parents[i]` is the position of node `i`'s parent, or `None` for a root.
/// Each node is reached by walking up from it until an already placed node or
/// a root; the walked path is then placed top-down. A walk that meets itself
/// has found a loop.
pub(crate) fn parent_first_order(parents: &[Option<usize>]) -> Result<Vec<usize>, CycleError> {
    let mut marks = vec![Mark::Unseen; parents.len()];
    let mut order = Vec::with_capacity(parents.len());

    for start in 0..parents.len() {
        let mut path = Vec::new();
        let mut cursor = Some(start);
        let mut looped = false;

        while let Some(node) = cursor {
            match marks[node] {
                Mark::Placed => break,
                Mark::Walking | Mark::Looping => {
                    looped = true;
                    break;
                }
                Mark::Unseen => {
                    marks[node] = Mark::Walking;
                    path.push(node);
                    cursor = parents[node];
                }
            }
        }

        let mark = if looped { Mark::Looping } else { Mark::Placed };
        for &node in &path {
            marks[node] = mark;
        }
        if !looped {
            order.extend(path.into_iter().rev());
        }
    }

    let remaining: Vec<usize> = (0..parents.len())
        .filter(|&node| marks[node] == Mark::Looping)
        .collect();
    if remaining.is_empty() {
        Ok(order)
    } else {
        Err(CycleError { remaining })
    }
}
