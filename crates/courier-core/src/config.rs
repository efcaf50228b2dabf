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

//! Declarative description of a delegation chain, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chain::{ChainBuilder, NodeSpec};
use crate::error::ConfigError;

/// Configuration for a single handler node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Unique label of the node (e.g., "window", "button")
    pub identity: String,
    /// Identity of the node unresolved events go to; absent for the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Event kinds the node resolves itself
    #[serde(default)]
    pub handles: Vec<String>,
}

/// Complete chain configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Node declarations, in any order
    pub nodes: Vec<NodeConfig>,
}

impl ChainConfig {
    /// Load chain configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load chain configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Save chain configuration to JSON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Turns the declarations into a builder. Validation happens in
    /// [`ChainBuilder::build`]; attach reactions with
    /// [`ChainBuilder::on_handle`] before building.
    pub fn into_builder(self) -> ChainBuilder {
        self.nodes
            .into_iter()
            .fold(ChainBuilder::new(), |builder, node| {
                let spec = match node.parent {
                    Some(parent) => NodeSpec::child(node.identity, parent),
                    None => NodeSpec::root(node.identity),
                };
                builder.node(spec.handles_all(node.handles))
            })
    }

    /// The window > form > button hierarchy: the window hides on `click`,
    /// the form handles nothing, the button recolours on `mouseover`.
    pub fn window_form_button() -> Self {
        Self {
            nodes: vec![
                NodeConfig {
                    identity: "window".to_string(),
                    parent: None,
                    handles: vec!["click".to_string()],
                },
                NodeConfig {
                    identity: "form".to_string(),
                    parent: Some("window".to_string()),
                    handles: Vec::new(),
                },
                NodeConfig {
                    identity: "button".to_string(),
                    parent: Some("form".to_string()),
                    handles: vec!["mouseover".to_string()],
                },
            ],
        }
    }
}
