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

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::node::{Capabilities, HandlerNode, NodeId, NodeSpec, Reaction};
use super::topology::parent_first_order;
use super::tree::Chain;
use crate::error::{ChainError, MalformedChain};
use crate::event::EventKind;

/// Collects node declarations and validates them into a [`Chain`].
///
/// Nodes may be declared in any order; parents are resolved by identity when
/// [`build`](ChainBuilder::build) runs.
#[derive(Default)]
pub struct ChainBuilder {
    specs: Vec<NodeSpec>,
    late_reactions: Vec<(String, Arc<dyn Reaction>)>,
}

impl ChainBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node.
    pub fn node(mut self, spec: NodeSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Attaches a reaction to a node declared elsewhere, typically one loaded
    /// from a [`ChainConfig`](crate::config::ChainConfig).
    ///
    /// Replaces any reaction the declaration carried. Naming a node that is
    /// never declared makes [`build`](ChainBuilder::build) fail.
    pub fn on_handle(
        mut self,
        identity: impl Into<String>,
        reaction: impl Reaction + 'static,
    ) -> Self {
        let reaction: Arc<dyn Reaction> = Arc::new(reaction);
        self.late_reactions.push((identity.into(), reaction));
        self
    }

    /// Number of declared nodes.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if no node has been declared.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Validates the declarations and builds the chain.
    ///
    /// ## Errors
    /// * [`ChainError::Malformed`] if the declarations are empty, contain an
    ///   empty or duplicate identity, name an unknown parent, have zero or
    ///   several roots, or loop; or if a reaction targets an undeclared node.
    /// * [`ChainError::Event`] if a capability kind is empty.
    pub fn build(self) -> Result<Chain, ChainError> {
        let ChainBuilder {
            specs,
            late_reactions,
        } = self;

        if specs.is_empty() {
            return Err(MalformedChain::Empty.into());
        }

        let mut positions: HashMap<String, usize> = HashMap::with_capacity(specs.len());
        for (position, spec) in specs.iter().enumerate() {
            if spec.identity.trim().is_empty() {
                return Err(MalformedChain::EmptyIdentity.into());
            }
            if positions.insert(spec.identity.clone(), position).is_some() {
                return Err(MalformedChain::DuplicateIdentity(spec.identity.clone()).into());
            }
        }

        let mut parents = Vec::with_capacity(specs.len());
        let mut roots = Vec::new();
        for spec in &specs {
            match &spec.parent {
                Some(parent) => {
                    let parent_position = positions.get(parent).copied().ok_or_else(|| {
                        MalformedChain::UnknownParent {
                            node: spec.identity.clone(),
                            parent: parent.clone(),
                        }
                    })?;
                    parents.push(Some(parent_position));
                }
                None => {
                    roots.push(spec.identity.clone());
                    parents.push(None);
                }
            }
        }

        match roots.len() {
            0 => return Err(MalformedChain::NoRoot.into()),
            1 => {}
            _ => return Err(MalformedChain::MultipleRoots(roots).into()),
        }

        let order = parent_first_order(&parents).map_err(|cycle| {
            MalformedChain::Cycle(
                cycle
                    .remaining
                    .into_iter()
                    .map(|position| specs[position].identity.clone())
                    .collect(),
            )
        })?;

        let mut declared: Vec<Option<NodeSpec>> = specs.into_iter().map(Some).collect();
        for (identity, reaction) in late_reactions {
            let Some(&position) = positions.get(&identity) else {
                return Err(MalformedChain::UndeclaredNode(identity).into());
            };
            if let Some(spec) = declared[position].as_mut() {
                spec.reaction = Some(reaction);
            }
        }

        // Arena slots follow the walk order, so parents precede children.
        let index: HashMap<String, NodeId> = order
            .iter()
            .enumerate()
            .filter_map(|(slot, &position)| {
                declared[position]
                    .as_ref()
                    .map(|spec| (spec.identity.clone(), NodeId(slot)))
            })
            .collect();

        let mut nodes = Vec::with_capacity(order.len());
        for &position in &order {
            let Some(spec) = declared[position].take() else {
                continue;
            };
            let capabilities = spec
                .handles
                .into_iter()
                .map(EventKind::new)
                .collect::<Result<Capabilities, _>>()?;
            nodes.push(HandlerNode {
                parent: spec.parent.and_then(|parent| index.get(&parent).copied()),
                identity: spec.identity,
                capabilities,
                reaction: spec.reaction,
            });
        }

        log::info!(
            "Built delegation chain of {} node(s) rooted at '{}'.",
            nodes.len(),
            nodes.first().map_or("", HandlerNode::identity)
        );
        Ok(Chain::from_arena(nodes, index))
    }
}

impl fmt::Debug for ChainBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainBuilder")
            .field("specs", &self.specs)
            .field(
                "late_reactions",
                &self
                    .late_reactions
                    .iter()
                    .map(|(identity, _)| identity)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_form_button() -> ChainBuilder {
        ChainBuilder::new()
            .node(NodeSpec::child("button", "form").handles("mouseover"))
            .node(NodeSpec::root("window").handles("click"))
            .node(NodeSpec::child("form", "window"))
    }

    fn malformed(result: Result<Chain, ChainError>) -> MalformedChain {
        match result {
            Err(ChainError::Malformed(reason)) => reason,
            other => panic!("expected a malformed chain, got {other:?}"),
        }
    }

    #[test]
    fn declarations_in_any_order_build_parent_first() {
        let chain = window_form_button().build().unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.node(chain.root()).unwrap().identity(), "window");

        let button = chain.find("button").unwrap();
        let form = chain.find("form").unwrap();
        assert!(form.index() < button.index());
        assert_eq!(chain.node(button).unwrap().parent(), Some(form));
    }

    #[test]
    fn empty_builder_is_rejected() {
        let result = ChainBuilder::new().build();
        assert_eq!(malformed(result), MalformedChain::Empty);
    }

    #[test]
    fn empty_identity_is_rejected() {
        let result = ChainBuilder::new().node(NodeSpec::root(" ")).build();
        assert_eq!(malformed(result), MalformedChain::EmptyIdentity);
    }

    #[test]
    fn duplicate_identity_is_rejected() {
        let result = ChainBuilder::new()
            .node(NodeSpec::root("window"))
            .node(NodeSpec::child("window", "window"))
            .build();
        assert_eq!(
            malformed(result),
            MalformedChain::DuplicateIdentity("window".into())
        );
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let result = ChainBuilder::new()
            .node(NodeSpec::root("window"))
            .node(NodeSpec::child("button", "panel"))
            .build();
        assert_eq!(
            malformed(result),
            MalformedChain::UnknownParent {
                node: "button".into(),
                parent: "panel".into(),
            }
        );
    }

    #[test]
    fn multiple_roots_are_rejected() {
        let result = ChainBuilder::new()
            .node(NodeSpec::root("window"))
            .node(NodeSpec::root("dialog"))
            .build();
        assert_eq!(
            malformed(result),
            MalformedChain::MultipleRoots(vec!["window".into(), "dialog".into()])
        );
    }

    #[test]
    fn all_nodes_with_parents_have_no_root() {
        let result = ChainBuilder::new()
            .node(NodeSpec::child("a", "b"))
            .node(NodeSpec::child("b", "a"))
            .build();
        assert_eq!(malformed(result), MalformedChain::NoRoot);
    }

    #[test]
    fn loop_beside_the_root_is_rejected() {
        let result = ChainBuilder::new()
            .node(NodeSpec::root("window"))
            .node(NodeSpec::child("a", "b"))
            .node(NodeSpec::child("b", "a"))
            .build();
        assert_eq!(
            malformed(result),
            MalformedChain::Cycle(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn empty_capability_kind_is_rejected() {
        let result = ChainBuilder::new()
            .node(NodeSpec::root("window").handles(""))
            .build();
        assert!(matches!(result, Err(ChainError::Event(_))));
    }

    #[test]
    fn late_reaction_needs_a_declared_node() {
        let result = window_form_button()
            .on_handle("sidebar", |_: &crate::event::Event| {})
            .build();
        assert_eq!(
            malformed(result),
            MalformedChain::UndeclaredNode("sidebar".into())
        );
    }

    #[test]
    fn late_reaction_is_attached() {
        let chain = window_form_button()
            .on_handle("window", |_: &crate::event::Event| {})
            .build()
            .unwrap();
        assert!(chain.node(chain.root()).unwrap().has_reaction());
        let form = chain.find("form").unwrap();
        assert!(!chain.node(form).unwrap().has_reaction());
    }
}
