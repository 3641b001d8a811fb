//! Breadth-first search towards the closest waypoint.

use std::collections::VecDeque;
use std::collections::hash_map::Entry;

use log::debug;
use log::trace;
use rustc_hash::FxHashMap;

use crate::algorithms::Search;
use crate::error::SearchError;
use crate::problem::Problem;
use crate::space::Coord;
use crate::space::Path;
use crate::stats::SearchStats;

/// Uninformed search that stops at the first waypoint it dequeues.
///
/// Every move costs the same, so FIFO order already yields a path with the
/// fewest moves.
#[derive(Debug)]
pub struct BreadthFirstSearch<'p, P>
where
    P: Problem,
{
    problem: &'p P,

    open: VecDeque<Coord>,
    /// Maps every reached position to the one it was reached from.
    ///
    /// Positions are marked when enqueued, so nothing is enqueued twice.
    parents: FxHashMap<Coord, Option<Coord>>,

    stats: SearchStats,
}

impl<'p, P> BreadthFirstSearch<'p, P>
where
    P: Problem,
{
    #[must_use]
    pub fn new(problem: &'p P) -> Self {
        let start = problem.start();

        let mut parents = FxHashMap::default();
        parents.insert(start, None);

        Self {
            problem,
            open: VecDeque::from([start]),
            parents,
            stats: SearchStats {
                generated: 1,
                frontier_peak: 1,
                ..Default::default()
            },
        }
    }

    fn path(&self, end: Coord) -> Path {
        let mut path = Path::new_from_start(end);
        let mut current = end;
        while let Some(Some(parent)) = self.parents.get(&current) {
            path.append(*parent);
            current = *parent;
        }
        path.reverse();
        path
    }

    fn find_waypoint(&mut self) -> Result<Path, SearchError> {
        if self.problem.waypoints().is_empty() {
            return Err(SearchError::NoWaypoints);
        }

        while let Some(position) = self.open.pop_front() {
            self.stats.expanded += 1;

            if self.problem.is_waypoint(&position) {
                trace!("BFS reached waypoint {position}");
                return Ok(self.path(position));
            }

            for neighbour in self.problem.neighbours(&position) {
                if !self.problem.navigable(&neighbour) {
                    continue;
                }
                if let Entry::Vacant(e) = self.parents.entry(neighbour) {
                    e.insert(Some(position));
                    self.open.push_back(neighbour);
                    self.stats.generated += 1;
                }
            }
            self.stats.frontier_peak = self.stats.frontier_peak.max(self.open.len());
        }

        Err(SearchError::NoPath {
            start: self.problem.start(),
        })
    }
}

impl<P> Search for BreadthFirstSearch<'_, P>
where
    P: Problem,
{
    fn solve(&mut self) -> Result<Path, SearchError> {
        let result = self.find_waypoint();
        debug!("BFS finished: {}", self.stats);
        result
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Shortest path (in moves) from the start to the closest waypoint.
pub fn bfs<P: Problem>(problem: &P) -> Result<Path, SearchError> {
    BreadthFirstSearch::new(problem).solve()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::problems::maze_2d::Maze2DProblem;
    use crate::space::Space;

    #[test]
    fn open_grid() {
        let problem = Maze2DProblem::open_grid(3, 3, Coord::new(0, 0), &[Coord::new(2, 2)]);
        let path = bfs(&problem).unwrap();

        assert_eq!(path.len(), 5);
        assert_eq!(path.start(), Some(&Coord::new(0, 0)));
        assert_eq!(path.end(), Some(&Coord::new(2, 2)));
        assert!(problem.validate_path(&path).is_ok());
    }

    #[test]
    fn stops_at_closest_waypoint() {
        let problem = Maze2DProblem::try_from(indoc! {"
            %%%%%%%
            %.  P.%
            %%%%%%%
        "})
        .unwrap();
        let path = bfs(&problem).unwrap();

        assert_eq!(path.coords(), &[Coord::new(1, 4), Coord::new(1, 5)]);
    }

    #[test]
    fn goes_around_walls() {
        let problem = Maze2DProblem::try_from(indoc! {"
            %%%%%%
            %P % %
            %% % %
            %    %
            %.%% %
            %%%%%%
        "})
        .unwrap();
        let path = bfs(&problem).unwrap();

        assert_eq!(path.cost(), 5);
        assert!(problem.space().valid_path(&path));
    }

    #[test]
    fn start_on_waypoint() {
        let problem = Maze2DProblem::open_grid(2, 2, Coord::new(1, 1), &[Coord::new(1, 1)]);
        let path = bfs(&problem).unwrap();
        assert_eq!(path.coords(), &[Coord::new(1, 1)]);
    }

    #[test]
    fn unreachable_waypoint() {
        let problem = Maze2DProblem::try_from(indoc! {"
            %%%%%
            %P%.%
            %%%%%
        "})
        .unwrap();
        let mut search = BreadthFirstSearch::new(&problem);
        assert_eq!(
            search.solve(),
            Err(SearchError::NoPath {
                start: Coord::new(1, 1)
            })
        );
        assert_eq!(search.stats().expanded, 1);
    }

    #[test]
    fn no_waypoints() {
        let problem = Maze2DProblem::open_grid(2, 2, Coord::new(0, 0), &[]);
        assert_eq!(bfs(&problem), Err(SearchError::NoWaypoints));
    }

    #[test]
    fn idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..20 {
            let problem = Maze2DProblem::random(&mut rng, 15, 15, 0.25, 3);
            let first = bfs(&problem);
            assert_eq!(first, bfs(&problem), "{problem}");
            if let Ok(path) = first {
                assert_eq!(problem.validate_leg(&path), Ok(()));
            }
        }
    }
}
