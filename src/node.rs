//! Tree node with ordered children and a weak parent link

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Shared handle to a node. Children are held through these handles.
pub type NodeRef<N> = Rc<Node<N>>;

/// A single vertex of an ordered, multi-child tree.
///
/// A node owns its children. The parent link is a [`Weak`] reference used
/// only for upward navigation, so dropping the root drops the whole subtree.
pub struct Node<N> {
    name: N,
    parent: RefCell<Weak<Node<N>>>,
    children: RefCell<Vec<NodeRef<N>>>,
}

impl<N> Node<N> {
    /// Create a node with no children and no parent
    pub fn new(name: N) -> NodeRef<N> {
        Rc::new(Self {
            name,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    /// Create a node and attach `children` to it in order
    pub fn with_children<I>(name: N, children: I) -> NodeRef<N>
    where
        I: IntoIterator<Item = NodeRef<N>>,
    {
        let node = Self::new(name);
        for child in children {
            node.add_child(child);
        }
        node
    }

    /// Append `child` as the last child and point its parent link here.
    ///
    /// Adding the same child twice keeps both entries; the child's parent
    /// link always refers to the node it was most recently added to.
    pub fn add_child(self: &Rc<Self>, child: NodeRef<N>) -> &Rc<Self> {
        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(child);
        self
    }

    pub fn name(&self) -> &N {
        &self.name
    }

    pub fn children(&self) -> Ref<'_, [NodeRef<N>]> {
        Ref::map(self.children.borrow(), Vec::as_slice)
    }

    /// Get the child at `index`, if any
    pub fn child(&self, index: usize) -> Option<NodeRef<N>> {
        self.children.borrow().get(index).cloned()
    }

    /// The owning node, or `None` for a root (or once the parent is dropped)
    pub fn parent(&self) -> Option<NodeRef<N>> {
        self.parent.borrow().upgrade()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.borrow().is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }
}

// Skips the parent link; following it would recurse back up the tree.
impl<N: fmt::Debug> fmt::Debug for Node<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("children", &*self.children.borrow())
            .finish()
    }
}
