//! A* over `(position, remaining waypoints)` states.
//!
//! The same cell is a different state for every set of waypoints still left to
//! visit, so the search may cross a cell several times on its way through all
//! of them.

use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::marker::PhantomData;

use log::debug;
use log::trace;
use num_traits::SaturatingAdd;
use rustc_hash::FxHashMap;

use crate::algorithms::Search;
use crate::algorithms::astar::AStarHeapNode;
use crate::algorithms::astar::AStarRank;
use crate::cost::Cost;
use crate::cost::StepCost;
use crate::data_structures::open_list::OpenList;
use crate::error::SearchError;
use crate::float_cost::FloatCost;
use crate::mst::MstCache;
use crate::problem::Problem;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Coord;
use crate::space::Path;
use crate::stats::SearchStats;
use crate::waypoints::WaypointSet;

/// Weight applied to the heuristic by the relaxed search.
pub const RELAXED_HEURISTIC_WEIGHT: f64 = 2.8;

/// Turns the two lower bounds of a state into a heuristic value.
///
/// - `nearest`: distance to the closest remaining waypoint.
/// - `mst`: MST weight of the remaining waypoints.
pub trait WaypointHeuristic: Debug {
    type C: Cost;

    fn h(nearest: StepCost, mst: StepCost) -> Self::C;
}

/// `nearest + mst`. Admissible, so searches with it find optimal tours.
#[derive(Debug)]
pub struct MstHeuristic;

impl WaypointHeuristic for MstHeuristic {
    type C = StepCost;

    #[inline(always)]
    fn h(nearest: StepCost, mst: StepCost) -> StepCost {
        nearest + mst
    }
}

/// [`MstHeuristic`] scaled by [`RELAXED_HEURISTIC_WEIGHT`].
///
/// Overestimates, trading optimality for far fewer expansions.
#[derive(Debug)]
pub struct WeightedMstHeuristic;

impl WaypointHeuristic for WeightedMstHeuristic {
    type C = FloatCost<f64>;

    #[inline(always)]
    fn h(nearest: StepCost, mst: StepCost) -> FloatCost<f64> {
        FloatCost::new(RELAXED_HEURISTIC_WEIGHT * f64::from(nearest + mst))
    }
}

/// What a multi-waypoint Search Node carries besides its position.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct WaypointNodeData<C: Cost> {
    pub g: StepCost,
    pub f: C,
    pub remaining: WaypointSet,
}

type StateKey = (Coord, WaypointSet);

/// A* visiting every waypoint of a problem.
#[derive(Debug)]
pub struct MultiAStarSearch<'p, P, H>
where
    P: Problem,
    H: WaypointHeuristic,
{
    problem: &'p P,

    search_tree: SearchTree<WaypointNodeData<H::C>>,
    open: OpenList<AStarHeapNode<H::C>>,
    /// Best f-value pushed for every state.
    ///
    /// States are pushed again only when they strictly improve on it.
    best: FxHashMap<StateKey, H::C>,
    mst: MstCache,

    stats: SearchStats,
    _phantom_heuristic: PhantomData<H>,
}

impl<'p, P, H> MultiAStarSearch<'p, P, H>
where
    P: Problem,
    H: WaypointHeuristic,
{
    /// Starts from `problem.start()` with every waypoint left to visit.
    ///
    /// A start on top of a waypoint visits it right away.
    #[must_use]
    pub fn new(problem: &'p P) -> Self {
        let mut search = Self {
            problem,
            search_tree: SearchTree::new(),
            open: OpenList::with_capacity(1024),
            best: FxHashMap::default(),
            mst: MstCache::new(),
            stats: SearchStats::default(),
            _phantom_heuristic: PhantomData,
        };

        let start = problem.start();
        let waypoints: WaypointSet = problem.waypoints().iter().copied().collect();
        if !waypoints.is_empty() {
            let remaining = waypoints.without(&start).unwrap_or(waypoints);
            let h = search.h(&start, &remaining);
            search.best.insert((start, remaining.clone()), h);
            search.push_new(start, None, 0, h, remaining);
        }

        search
    }

    #[inline(always)]
    fn h(&mut self, s: &Coord, remaining: &WaypointSet) -> H::C {
        H::h(remaining.nearest_distance(s), self.mst.weight(remaining))
    }

    fn push_new(
        &mut self,
        s: Coord,
        parent: Option<SearchTreeIndex>,
        g: StepCost,
        h: H::C,
        remaining: WaypointSet,
    ) {
        let rank = AStarRank::new(H::C::from_steps(g), h);
        let node_index = self.search_tree.push(SearchTreeNode::new(
            s,
            parent,
            WaypointNodeData {
                g,
                f: rank.f(),
                remaining,
            },
        ));
        self.open.push(AStarHeapNode {
            rank,
            sequence: self.stats.generated,
            node_index,
        });
        self.stats.generated += 1;
    }

    fn find_tour(&mut self) -> Result<Path, SearchError> {
        if self.problem.waypoints().is_empty() {
            return Err(SearchError::NoWaypoints);
        }

        while let Some(heap_node) = self.open.pop() {
            let node_index = heap_node.node_index;
            let node = &self.search_tree[node_index];
            let key: StateKey = (*node.position(), node.data().remaining.clone());
            let (g, f) = (node.data().g, node.data().f);

            // A better node for the same state was pushed after this one.
            if self.best.get(&key).is_some_and(|best_f| *best_f < f) {
                self.stats.stale += 1;
                continue;
            }
            let (state, remaining) = key;
            self.stats.expanded += 1;

            if remaining.is_empty() {
                trace!("Visited every waypoint, ending at {state} with g={g}");
                return Ok(self.search_tree.path(node_index));
            }

            for s in self.problem.neighbours(&state) {
                if !self.problem.navigable(&s) {
                    continue;
                }

                let neigh_remaining = remaining.without(&s).unwrap_or_else(|| remaining.clone());
                let neigh_g = g + 1;
                let neigh_h = self.h(&s, &neigh_remaining);
                let neigh_f = H::C::from_steps(neigh_g).saturating_add(&neigh_h);

                match self.best.entry((s, neigh_remaining.clone())) {
                    Entry::Occupied(mut e) => {
                        if neigh_f >= *e.get() {
                            continue;
                        }
                        e.insert(neigh_f);
                    }
                    Entry::Vacant(e) => {
                        e.insert(neigh_f);
                    }
                }
                self.push_new(s, Some(node_index), neigh_g, neigh_h, neigh_remaining);
            }
        }

        Err(SearchError::NoPath {
            start: self.problem.start(),
        })
    }
}

impl<P, H> Search for MultiAStarSearch<'_, P, H>
where
    P: Problem,
    H: WaypointHeuristic,
{
    fn solve(&mut self) -> Result<Path, SearchError> {
        let result = self.find_tour();
        self.stats.frontier_peak = self.open.peak();
        self.stats.mst_sets = self.mst.len();
        self.stats.mst_hits = self.mst.hits();
        debug!("Multi-waypoint A* finished: {}", self.stats);
        result
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Shortest path visiting every waypoint.
pub fn astar_multi<P: Problem>(problem: &P) -> Result<Path, SearchError> {
    MultiAStarSearch::<P, MstHeuristic>::new(problem).solve()
}

/// A path visiting every waypoint, found greedily. Not necessarily shortest.
pub fn fast<P: Problem>(problem: &P) -> Result<Path, SearchError> {
    MultiAStarSearch::<P, WeightedMstHeuristic>::new(problem).solve()
}
