//! Path-finding strategies over waypoint mazes.
//!
//! Every strategy takes a [`Problem`] and returns the [`Path`] from its start
//! to the last goal it reached.

use derive_more::Display;

use crate::error::SearchError;
use crate::problem::Problem;
use crate::space::Path;
use crate::stats::SearchStats;

pub mod astar;
pub mod bfs;
pub mod multi_astar;

/// A search that runs once over its problem.
pub trait Search {
    fn solve(&mut self) -> Result<Path, SearchError>;

    /// Counters for the work done so far.
    fn stats(&self) -> SearchStats;
}

/// The strategies, for callers that pick one at runtime.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SearchMethod {
    /// Breadth-first search to the closest waypoint
    #[display("bfs")]
    Bfs,
    /// A* to the first waypoint
    #[display("astar")]
    Astar,
    /// A* through every waypoint, shortest tour
    #[display("astar_multi")]
    #[value(name = "astar_multi")]
    AstarMulti,
    /// Weighted A* through every waypoint
    #[display("fast")]
    Fast,
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 4] = [
        SearchMethod::Bfs,
        SearchMethod::Astar,
        SearchMethod::AstarMulti,
        SearchMethod::Fast,
    ];

    /// Whether the method's paths go through every waypoint.
    pub fn visits_all_waypoints(&self) -> bool {
        matches!(self, SearchMethod::AstarMulti | SearchMethod::Fast)
    }

    /// Solves `problem`, returning the outcome along with the search counters.
    pub fn run<P: Problem>(&self, problem: &P) -> (Result<Path, SearchError>, SearchStats) {
        match self {
            SearchMethod::Bfs => run_search(bfs::BreadthFirstSearch::new(problem)),
            SearchMethod::Astar => run_search(astar::AStarSearch::new(problem)),
            SearchMethod::AstarMulti => run_search(
                multi_astar::MultiAStarSearch::<P, multi_astar::MstHeuristic>::new(problem),
            ),
            SearchMethod::Fast => run_search(multi_astar::MultiAStarSearch::<
                P,
                multi_astar::WeightedMstHeuristic,
            >::new(problem)),
        }
    }
}

fn run_search<S: Search>(mut search: S) -> (Result<Path, SearchError>, SearchStats) {
    let result = search.solve();
    (result, search.stats())
}
