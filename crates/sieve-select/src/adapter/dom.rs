use sieve_dom::{DomTree, NodeId};

use super::TreeAdapter;

impl TreeAdapter for DomTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        Self::children(self, node).to_vec()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.as_element(node).map(|e| e.tag_name.as_str())
    }

    fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.as_element(node).and_then(|e| e.attribute(name))
    }

    fn has_class(&self, node: NodeId, class_name: &str) -> bool {
        self.as_element(node).is_some_and(|e| e.has_class(class_name))
    }

    // Walks sibling links; no scan of the parent.
    fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        Self::next_element_sibling(self, node)
    }

    fn descendants_or_self(&self, scope: NodeId) -> Vec<NodeId> {
        std::iter::once(scope).chain(self.descendants(scope)).collect()
    }

    fn find_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.element_by_id(scope, id)
    }

    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        Self::is_descendant_of(self, node, ancestor)
    }
}
