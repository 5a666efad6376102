//! JSON documents.
//!
//! A document is either a single node or an array of nodes; every top-level
//! node becomes a child of the tree's Document root.
//!
//! ```text
//! [
//!   { "tag": "div", "attrs": { "id": "main" }, "children": [
//!       { "tag": "p", "children": [ { "text": "hello" } ] },
//!       { "comment": "ignored by selectors" }
//!   ] }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

/// One node of a serialized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentNode {
    /// An element with optional attributes and children.
    Element {
        /// Tag name, stored as written.
        tag: String,
        /// Attribute list.
        #[serde(default, skip_serializing_if = "AttributesMap::is_empty")]
        attrs: AttributesMap,
        /// Child nodes in document order.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<DocumentNode>,
    },
    /// A text node.
    Text {
        /// Character data.
        text: String,
    },
    /// A comment node.
    Comment {
        /// Comment data.
        comment: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentRoot {
    Many(Vec<DocumentNode>),
    One(DocumentNode),
}

/// Errors raised while loading a JSON document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input is not JSON, or does not have the node shape.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    /// The input parsed but contains no nodes.
    #[error("document contains no nodes")]
    Empty,
}

impl DomTree {
    /// Build a tree from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] when the text is not a valid document
    /// and [`DocumentError::Empty`] for an empty top-level array.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let nodes = match serde_json::from_str::<DocumentRoot>(json)? {
            DocumentRoot::Many(nodes) => nodes,
            DocumentRoot::One(node) => vec![node],
        };
        if nodes.is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(Self::from_nodes(&nodes))
    }

    /// Build a tree whose Document root has `nodes` as children.
    #[must_use]
    pub fn from_nodes(nodes: &[DocumentNode]) -> Self {
        let mut tree = Self::new();
        for node in nodes {
            let _ = tree.append_document_node(NodeId::ROOT, node);
        }
        tree
    }

    /// Append a serialized subtree under `parent`, returning the new subtree root.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not allocated by this tree.
    pub fn append_document_node(&mut self, parent: NodeId, node: &DocumentNode) -> NodeId {
        match node {
            DocumentNode::Element {
                tag,
                attrs,
                children,
            } => {
                let id = self.alloc(NodeType::Element(ElementData {
                    tag_name: tag.clone(),
                    attrs: attrs.clone(),
                }));
                self.append_child(parent, id);
                for child in children {
                    let _ = self.append_document_node(id, child);
                }
                id
            }
            DocumentNode::Text { text } => self.append_text(parent, text),
            DocumentNode::Comment { comment } => {
                let id = self.alloc(NodeType::Comment(comment.clone()));
                self.append_child(parent, id);
                id
            }
        }
    }

    /// Serialize the children of the Document root.
    #[must_use]
    pub fn to_document(&self) -> Vec<DocumentNode> {
        self.children(NodeId::ROOT)
            .iter()
            .filter_map(|&id| self.to_document_node(id))
            .collect()
    }

    /// Serialize a single subtree. Returns `None` for the Document node itself.
    #[must_use]
    pub fn to_document_node(&self, id: NodeId) -> Option<DocumentNode> {
        match &self.get(id)?.node_type {
            NodeType::Document => None,
            NodeType::Element(data) => Some(DocumentNode::Element {
                tag: data.tag_name.clone(),
                attrs: data.attrs.clone(),
                children: self
                    .children(id)
                    .iter()
                    .filter_map(|&child| self.to_document_node(child))
                    .collect(),
            }),
            NodeType::Text(text) => Some(DocumentNode::Text { text: text.clone() }),
            NodeType::Comment(comment) => Some(DocumentNode::Comment {
                comment: comment.clone(),
            }),
        }
    }
}
