//! A* towards a single target waypoint.

use log::debug;
use log::trace;
use rustc_hash::FxHashMap;

use crate::algorithms::Search;
use crate::cost::Cost;
use crate::cost::StepCost;
use crate::data_structures::open_list::OpenList;
use crate::distance::manhattan;
use crate::error::SearchError;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Coord;
use crate::space::Path;
use crate::stats::SearchStats;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break for lower g.
///
/// Preferring lower g on ties matters here: on a 4-connected grid with the
/// Manhattan heuristic it expands a cell's cheapest parent first, which keeps
/// first-come parents optimal even though cells are never re-opened.
///
/// ```
/// use waypoint_search::algorithms::astar::AStarRank;
///
/// assert!(AStarRank::new(1u32, 3u32) < AStarRank::new(3u32, 1u32));
/// assert!(AStarRank::new(0u32, 3u32) < AStarRank::new(0u32, 4u32));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank<C: Cost> {
    f: C,
    g: C,
}
impl<C> AStarRank<C>
where
    C: Cost,
{
    pub fn new(g: C, h: C) -> Self {
        let f = g.saturating_add(&h);
        debug_assert!(f.valid(), "f-value saturated with g={g}, h={h}");
        Self { f, g }
    }
    #[inline(always)]
    pub fn f(&self) -> C {
        self.f
    }
    #[inline(always)]
    pub fn g(&self) -> C {
        self.g
    }
}

/// A heap node for A*
///
/// Heap nodes carry just ranking information and an index to the actual search
/// nodes, so heap operations move as little data as possible.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct AStarHeapNode<C>
where
    C: Cost,
{
    /// The rank of this node that defines how good it is.
    pub rank: AStarRank<C>,
    /// Insertion order. Breaks the remaining ties, oldest first.
    pub sequence: usize,
    /// The index of this node in the Search Tree. Ignored when ranking.
    pub node_index: SearchTreeIndex,
}

/// PartialEq is forwarded to `(rank, sequence)`
impl<C: Cost> PartialEq for AStarHeapNode<C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank) && self.sequence == other.sequence
    }
}
impl<C: Cost> Eq for AStarHeapNode<C> {}

impl<C: Cost> PartialOrd for AStarHeapNode<C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
/// Ord is forwarded to `(rank, sequence)`
impl<C: Cost> Ord for AStarHeapNode<C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank
            .cmp(&other.rank)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A* with the Manhattan distance to one target.
///
/// Cells enter the search once, through the first node that reaches them.
#[derive(Debug)]
pub struct AStarSearch<'p, P>
where
    P: Problem,
{
    problem: &'p P,
    target: Option<Coord>,

    /// All the Search Nodes, carrying their g-value.
    search_tree: SearchTree<StepCost>,
    open: OpenList<AStarHeapNode<StepCost>>,
    /// Every cell that ever reached the Open list.
    node_map: FxHashMap<Coord, SearchTreeIndex>,

    stats: SearchStats,
}

impl<'p, P> AStarSearch<'p, P>
where
    P: Problem,
{
    /// Searches towards the first waypoint of `problem`.
    #[must_use]
    pub fn new(problem: &'p P) -> Self {
        let mut search = Self {
            problem,
            target: problem.waypoints().first().copied(),
            search_tree: SearchTree::new(),
            open: OpenList::with_capacity(256),
            node_map: FxHashMap::default(),
            stats: SearchStats::default(),
        };

        if let Some(target) = search.target {
            let start = problem.start();
            search.push_new(start, None, 0, manhattan(&start, &target));
        }

        search
    }

    fn push_new(&mut self, s: Coord, parent: Option<SearchTreeIndex>, g: StepCost, h: StepCost) {
        debug_assert!(!self.node_map.contains_key(&s));

        let node_index = self
            .search_tree
            .push(SearchTreeNode::new(s, parent, g));
        self.node_map.insert(s, node_index);
        self.open.push(AStarHeapNode {
            rank: AStarRank::new(g, h),
            sequence: self.stats.generated,
            node_index,
        });
        self.stats.generated += 1;
    }

    fn find_target(&mut self) -> Result<Path, SearchError> {
        let target = self.target.ok_or(SearchError::NoWaypoints)?;

        while let Some(heap_node) = self.open.pop() {
            let node_index = heap_node.node_index;
            let node = &self.search_tree[node_index];
            let state = *node.position();
            let g = *node.data();
            self.stats.expanded += 1;

            if state == target {
                trace!("A* reached {target} with g={g}");
                return Ok(self.search_tree.path(node_index));
            }

            for s in self.problem.neighbours(&state) {
                if !self.problem.navigable(&s) || self.node_map.contains_key(&s) {
                    continue;
                }
                self.push_new(s, Some(node_index), g + 1, manhattan(&s, &target));
            }
        }

        Err(SearchError::NoPath {
            start: self.problem.start(),
        })
    }
}

impl<P> Search for AStarSearch<'_, P>
where
    P: Problem,
{
    fn solve(&mut self) -> Result<Path, SearchError> {
        let result = self.find_target();
        self.stats.frontier_peak = self.open.peak();
        debug!("A* finished: {}", self.stats);
        result
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Shortest path from the start to the first waypoint.
pub fn astar_single<P: Problem>(problem: &P) -> Result<Path, SearchError> {
    AStarSearch::new(problem).solve()
}
