//! The Tree Adapter: the only way the engine reads a tree.
//!
//! The matcher never names a concrete tree type. Structure, tag names,
//! attributes and document order are all read through [`TreeAdapter`].
//! Backends implement the five required methods; the lookup primitives have
//! generic defaults built on `children`/`parent` that a backend can override
//! with something cheaper (an id index, a class map).

/// [`TreeAdapter`] for the bundled arena tree.
pub mod dom;

use std::fmt::Debug;

use serde::Serialize;
use strum_macros::Display;

/// [§ 4.4 compareDocumentPosition](https://dom.spec.whatwg.org/#dom-node-comparedocumentposition)
///
/// Where node `a` sits relative to node `b`. Replaces the DOM's
/// `DOCUMENT_POSITION_*` bitmask with a plain ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum DocumentOrder {
    /// `a` comes before `b` in tree order and is not its ancestor.
    Precedes,
    /// `a` comes after `b` in tree order. This includes `a` being a
    /// descendant of `b`, and `a` and `b` living in different trees.
    Follows,
    /// `a` is an ancestor of `b`.
    Contains,
    /// `a` and `b` are the same node.
    Same,
}

/// Read-only view of a rooted tree of labeled nodes.
///
/// Element nodes are the nodes for which [`tag_name`](Self::tag_name)
/// returns `Some`; only elements are ever matched. All sequences are in
/// document (preorder) order.
pub trait TreeAdapter {
    /// Host-defined node handle. Identity is `Eq`.
    type Node: Copy + Eq + Debug;

    /// The root of the tree; the default query context.
    fn root(&self) -> Self::Node;

    /// Parent of `node`, `None` for the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children of `node` in order, including non-element nodes.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Tag name of an element, `None` for every other kind of node.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Value of the named attribute, `None` when absent or not an element.
    fn get_attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Whether `node` is an element.
    fn is_element(&self, node: Self::Node) -> bool {
        self.tag_name(node).is_some()
    }

    /// Whether `node` carries the named attribute (with any value).
    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.get_attribute(node, name).is_some()
    }

    /// Whether the whitespace-separated `class` attribute contains `class_name`.
    fn has_class(&self, node: Self::Node, class_name: &str) -> bool {
        self.get_attribute(node, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class_name))
    }

    /// First element following `node` among its siblings.
    fn next_element_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let parent = self.parent(node)?;
        self.children(parent)
            .into_iter()
            .skip_while(|&sibling| sibling != node)
            .skip(1)
            .find(|&sibling| self.is_element(sibling))
    }

    /// `scope` followed by all of its descendants, in document order.
    fn descendants_or_self(&self, scope: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack = vec![scope];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    /// First element in `scope` (inclusive) whose id attribute equals `id`.
    fn find_by_id(&self, scope: Self::Node, id: &str) -> Option<Self::Node> {
        self.descendants_or_self(scope)
            .into_iter()
            .find(|&node| self.is_element(node) && self.get_attribute(node, "id") == Some(id))
    }

    /// Elements in `scope` (inclusive) carrying `class_name`.
    fn find_by_class(&self, scope: Self::Node, class_name: &str) -> Vec<Self::Node> {
        self.descendants_or_self(scope)
            .into_iter()
            .filter(|&node| self.is_element(node) && self.has_class(node, class_name))
            .collect()
    }

    /// Elements in `scope` (inclusive) whose tag equals `tag_name`, compared
    /// ASCII case-insensitively. `"*"` selects every element.
    fn find_by_tag(&self, scope: Self::Node, tag_name: &str) -> Vec<Self::Node> {
        let any = tag_name == "*";
        self.descendants_or_self(scope)
            .into_iter()
            .filter(|&node| {
                self.tag_name(node)
                    .is_some_and(|tag| any || tag.eq_ignore_ascii_case(tag_name))
            })
            .collect()
    }

    /// Position of `a` relative to `b` in document order.
    fn compare_document_order(&self, a: Self::Node, b: Self::Node) -> DocumentOrder {
        if a == b {
            return DocumentOrder::Same;
        }
        let path_a = self.path_from_root(a);
        let path_b = self.path_from_root(b);

        let shared = path_a
            .iter()
            .zip(&path_b)
            .take_while(|(x, y)| x == y)
            .count();

        if shared == 0 {
            return DocumentOrder::Follows;
        }
        if shared == path_a.len() {
            return DocumentOrder::Contains;
        }
        if shared == path_b.len() {
            return DocumentOrder::Follows;
        }

        // Both paths diverge below a common ancestor: compare the two
        // branches by their position among that ancestor's children.
        let branch_a = path_a[shared];
        let branch_b = path_b[shared];
        for child in self.children(path_a[shared - 1]) {
            if child == branch_a {
                return DocumentOrder::Precedes;
            }
            if child == branch_b {
                return DocumentOrder::Follows;
            }
        }
        DocumentOrder::Follows
    }

    /// Ancestor chain of `node`, starting at its root and ending with `node`.
    fn path_from_root(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Whether `node` is a strict descendant of `ancestor`.
    fn is_descendant_of(&self, node: Self::Node, ancestor: Self::Node) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}
