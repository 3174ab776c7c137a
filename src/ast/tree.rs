//! Traits and functions modelling tree-structure.

/// A trait generalising tree-structure.
pub trait Tree {
    /// The type of the nodes in this tree.
    type Node;

    /// Returns a reference to the root of `self`.
    fn root(&self) -> &Self::Node;

    /// Consumes `self` and maps `op` over it, typically by
    /// applying `op` to its root.
    fn map<U, F>(self, op: F) -> U
    where
        F: FnOnce(Self::Node) -> U;
}

/// A trait for trees with countable nodes.
pub trait NodeCount<T>
where
    Self: Tree,
{
    /// Returns the number of nodes in `self`.
    fn count_nodes(&self) -> T;
}
