use std::cmp::min;
use std::fmt::Debug;

// A heap is a tree-like structure where every subtree's root has a better score
// than all the other nodes in the subtree, laid out level by level in a Vec.
//
// With arity A,
//   - Up:          `(i-1)/A`
//   - First child: `A*i + 1`
//   - Last child:  `A*(i+1)`
const HEAP_ARITY: usize = 8usize;

/// The parent node
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    (i - 1) / HEAP_ARITY
}
/// The first children
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    (HEAP_ARITY * i) + 1
}
/// The last children
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    HEAP_ARITY * (i + 1)
}

/// Index of the best element of a non-empty slice, first one on ties.
#[inline(always)]
#[must_use]
fn best_index<T: Ord>(xs: &[T]) -> usize {
    debug_assert!(!xs.is_empty());

    let mut best = 0;
    for (i, x) in xs.iter().enumerate().skip(1) {
        if *x < xs[best] {
            best = i;
        }
    }
    best
}

/// The Open list of best-first searches.
///
/// A d-ary min-heap. Wide nodes keep the tree shallow and the children of a
/// node fit in a few cache lines.
///
/// Entries are never re-ranked. Searches push a new entry when they improve a
/// state and skip the stale one when it surfaces.
#[derive(Debug)]
pub struct OpenList<N>
where
    N: Debug + Ord,
{
    heap: Vec<N>,
    /// Largest size reached.
    peak: usize,
}

impl<N> OpenList<N>
where
    N: Debug + Ord,
{
    pub fn new() -> Self {
        Self {
            heap: vec![],
            peak: 0,
        }
    }
    pub fn with_capacity(s: usize) -> Self {
        Self {
            heap: Vec::with_capacity(s),
            peak: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn peek(&self) -> Option<&N> {
        self.heap.first()
    }

    pub fn push(&mut self, n: N) {
        let index = self.heap.len();
        self.heap.push(n);
        self.peak = self.peak.max(self.heap.len());
        self.sift_up(index);

        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<N> {
        if self.heap.len() <= 1 {
            return self.heap.pop();
        }

        let top = self.heap.swap_remove(0);
        self.sift_down(0);

        self.verify_heap();
        Some(top)
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            debug_assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    // Implementation details

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, index: usize) -> usize {
        debug_assert!(index < self.heap.len(), "Index out of bounds...");

        let mut pos = index;
        while pos > 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        debug_assert!(index < len, "Index out of bounds...");

        loop {
            // Find the best child
            let mut child = down_left(index);
            if child >= len {
                break;
            }

            debug_assert_eq!(child + HEAP_ARITY, down_right(index) + 1);
            child += best_index(&self.heap[child..min(child + HEAP_ARITY, len)]);

            if self.heap[index] <= self.heap[child] {
                break;
            }

            self.heap.swap(index, child);
            index = child;
        }
        index
    }
}

impl<N> Default for OpenList<N>
where
    N: Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
