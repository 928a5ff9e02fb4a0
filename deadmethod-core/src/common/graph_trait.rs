//! Shared graph traversal abstraction.
//!
//! The class hierarchy is walked in two directions (towards superclasses and
//! towards subclasses); both views share this BFS.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Trait for graph traversal operations.
///
/// # Example
/// ```ignore
/// impl GraphTraversal for Superclasses<'_> {
///     type Node = String;
///
///     fn neighbors(&self, node: &String) -> Vec<String> {
///         self.0.parents_of(node)
///     }
///
///     fn contains_node(&self, node: &String) -> bool {
///         self.0.contains(node)
///     }
/// }
///
/// let ancestors = Superclasses(&hierarchy).reachable_from_single("Child".into());
/// ```
pub trait GraphTraversal {
    /// The type used to identify nodes in the graph.
    type Node: Clone + Eq + Hash;

    /// Returns all neighbors (outgoing edges) of a node.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Checks if the graph contains a node.
    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Multi-source BFS: every node reachable from any root, roots included.
    ///
    /// Roots not in the graph are ignored. Each node and edge is visited at
    /// most once, so cycles (`class A extends B`, `class B extends A` in
    /// broken code) terminate.
    fn reachable_from<I>(&self, roots: I) -> HashSet<Self::Node>
    where
        I: IntoIterator<Item = Self::Node>,
    {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        for root in roots {
            if self.contains_node(&root) && visited.insert(root.clone()) {
                queue.push_back(root);
            }
        }

        while let Some(node) = queue.pop_front() {
            for neighbor in self.neighbors(&node) {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited
    }

    /// Convenience wrapper around `reachable_from` for single-root queries.
    fn reachable_from_single(&self, root: Self::Node) -> HashSet<Self::Node> {
        self.reachable_from(std::iter::once(root))
    }
}
