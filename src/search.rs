use std::fmt::Debug;

use nonmax::NonMaxUsize;

use crate::space::Coord;
use crate::space::Path;

/// A reference to a `SearchTreeNode<D>`.
///
/// An index into the tree's arena. `NonMax` lets `Option<SearchTreeIndex>`
/// stay as wide as the index itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTreeIndex {
    index: NonMaxUsize,
}

impl SearchTreeIndex {
    /// Panics on `usize::MAX`, which no `Vec` of nodes can reach.
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self {
            index: NonMaxUsize::new(index).expect("SearchTree index out of range"),
        }
    }

    #[inline(always)]
    pub fn as_usize(&self) -> usize {
        self.index.get()
    }
}

/// A search node. Immutable once pushed into a [`SearchTree`].
///
/// `D` carries whatever else the algorithm needs per node (costs, remaining
/// waypoints).
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct SearchTreeNode<D> {
    pub(crate) parent: Option<SearchTreeIndex>,
    pub(crate) position: Coord,
    pub(crate) data: D,
}

impl<D> SearchTreeNode<D> {
    pub fn new(position: Coord, parent: Option<SearchTreeIndex>, data: D) -> Self {
        Self {
            parent,
            position,
            data,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> &Coord {
        &self.position
    }

    #[inline(always)]
    pub fn parent(&self) -> Option<SearchTreeIndex> {
        self.parent
    }

    #[inline(always)]
    pub fn data(&self) -> &D {
        &self.data
    }
}

/// All the Search Nodes of a search.
///
/// Naturally forms a Search Tree as each node may have a parent Node. Only
/// grows, so indices stay valid for the whole search.
pub struct SearchTree<D> {
    nodes: Vec<SearchTreeNode<D>>,
}

impl<D> SearchTree<D> {
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchTreeNode<D>) -> SearchTreeIndex {
        debug_assert!(
            node.parent.is_none_or(|p| p.as_usize() < self.nodes.len()),
            "Parents must be pushed before their children"
        );
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks parent links up to the root.
    #[must_use]
    pub fn path(&self, mut node_index: SearchTreeIndex) -> Path {
        let mut path = Path::new_from_start(self[node_index].position);

        while let Some(parent_index) = self[node_index].parent {
            debug_assert!(parent_index < node_index);
            path.append(self[parent_index].position);
            node_index = parent_index;
        }

        path.reverse();
        path
    }
}

impl<D> Default for SearchTree<D> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::ops::Index<SearchTreeIndex> for SearchTree<D> {
    type Output = SearchTreeNode<D>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.as_usize()]
    }
}

impl<D> std::fmt::Debug for SearchTree<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}
