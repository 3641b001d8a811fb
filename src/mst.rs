//! Minimum spanning tree heuristic over waypoint sets.
//!
//! The weight of the MST over the remaining waypoints (Manhattan edges) never
//! exceeds the cost of any walk visiting all of them, so it makes a good
//! admissible component of multi-waypoint heuristics.

use log::trace;
use rustc_hash::FxHashMap;

use crate::cost::StepCost;
use crate::distance::manhattan;
use crate::space::Coord;
use crate::waypoints::WaypointSet;

/// Disjoint sets over `0..n`.
///
/// `None` marks a root.
#[derive(Debug)]
pub struct DisjointSet {
    parents: Vec<Option<usize>>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parents: vec![None; n],
        }
    }

    /// Finds the root of `key`, pointing everything on the way straight to it.
    pub fn resolve(&mut self, key: usize) -> usize {
        let mut root = key;
        while let Some(parent) = self.parents[root] {
            root = parent;
        }

        let mut k = key;
        while let Some(parent) = self.parents[k] {
            if parent != root {
                self.parents[k] = Some(root);
            }
            k = parent;
        }
        root
    }

    /// Joins the trees of `a` and `b`.
    ///
    /// Returns whether they were apart.
    pub fn unify(&mut self, a: usize, b: usize) -> bool {
        let ra = self.resolve(a);
        let rb = self.resolve(b);
        if ra == rb {
            return false;
        }
        self.parents[rb] = Some(ra);
        true
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Kruskal over the complete graph of a set of objectives.
#[derive(Debug)]
pub struct Mst {
    objectives: Vec<Coord>,
    /// `(distance, i, j)` with `i < j`, indices into `objectives`.
    edges: Vec<(StepCost, usize, usize)>,
}

impl Mst {
    pub fn new<'a, I>(objectives: I) -> Self
    where
        I: IntoIterator<Item = &'a Coord>,
    {
        let mut objectives: Vec<Coord> = objectives.into_iter().copied().collect();
        objectives.sort_unstable();
        objectives.dedup();

        let n = objectives.len();
        let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((manhattan(&objectives[i], &objectives[j]), i, j));
            }
        }

        Self { objectives, edges }
    }

    /// Adds edges by increasing weight, skipping those closing a cycle.
    ///
    /// Objectives are sorted, so equal weights tie-break on the endpoints'
    /// natural order.
    #[must_use]
    pub fn compute_weight(&self) -> StepCost {
        if self.objectives.len() < 2 {
            return 0;
        }

        let mut edges = self.edges.clone();
        edges.sort_unstable();

        let mut forest = DisjointSet::new(self.objectives.len());
        let mut weight: StepCost = 0;
        let mut accepted = 0usize;
        for (distance, i, j) in edges {
            if forest.unify(i, j) {
                weight += distance;
                accepted += 1;
                if accepted + 1 == self.objectives.len() {
                    break;
                }
            }
        }
        weight
    }
}

/// MST weights of the waypoint sets a search has already seen.
///
/// Lives for a single search.
#[derive(Debug, Default)]
pub struct MstCache {
    weights: FxHashMap<WaypointSet, StepCost>,
    hits: usize,
}

impl MstCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weight(&mut self, set: &WaypointSet) -> StepCost {
        if let Some(w) = self.weights.get(set) {
            self.hits += 1;
            return *w;
        }

        let w = Mst::new(set).compute_weight();
        trace!("MST{set} = {w}");
        self.weights.insert(set.clone(), w);
        w
    }

    /// Number of distinct sets computed.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    fn coords(cs: &[(i32, i32)]) -> Vec<Coord> {
        cs.iter().copied().map(Coord::from).collect()
    }

    #[test]
    fn disjoint_set() {
        let mut s = DisjointSet::new(5);
        assert_eq!(s.len(), 5);
        for i in 0..5 {
            assert_eq!(s.resolve(i), i);
        }
        assert!(s.unify(0, 1));
        assert!(s.unify(2, 3));
        assert!(s.unify(1, 3));
        assert!(!s.unify(0, 2));
        assert_eq!(s.resolve(3), s.resolve(0));
        assert_ne!(s.resolve(4), s.resolve(0));
    }

    #[test]
    fn resolve_compresses_paths() {
        let mut s = DisjointSet::new(4);
        // 3 -> 2 -> 1 -> 0
        assert!(s.unify(2, 3));
        assert!(s.unify(1, 2));
        assert!(s.unify(0, 1));
        let root = s.resolve(3);
        assert_eq!(root, 0);
        assert_eq!(s.parents[3], Some(0));
        assert_eq!(s.parents[2], Some(0));
    }

    #[test]
    fn trivial_sets_weigh_nothing() {
        assert_eq!(Mst::new(&coords(&[])).compute_weight(), 0);
        assert_eq!(Mst::new(&coords(&[(3, 4)])).compute_weight(), 0);
        assert_eq!(Mst::new(&coords(&[(3, 4), (3, 4)])).compute_weight(), 0);
    }

    #[test]
    fn pair_weighs_its_distance() {
        let cs = coords(&[(0, 0), (3, 4)]);
        assert_eq!(Mst::new(&cs).compute_weight(), 7);
    }

    #[test]
    fn square() {
        // Corners of a 2x2 square, three sides suffice.
        let cs = coords(&[(0, 0), (0, 2), (2, 0), (2, 2)]);
        assert_eq!(Mst::new(&cs).compute_weight(), 6);
    }

    #[test]
    fn line() {
        let cs = coords(&[(0, 9), (0, 0), (0, 3), (0, 4)]);
        assert_eq!(Mst::new(&cs).compute_weight(), 9);
    }

    /// Total length of visiting `cs` in the given order.
    fn walk(cs: &[Coord]) -> StepCost {
        cs.windows(2).map(|w| manhattan(&w[0], &w[1])).sum()
    }

    #[test]
    fn never_above_hamiltonian_paths() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let n = rng.random_range(2..7);
            let cs: Vec<Coord> = (0..n)
                .map(|_| Coord::new(rng.random_range(0..20), rng.random_range(0..20)))
                .collect();
            let w = Mst::new(&cs).compute_weight();

            let mut order = cs.clone();
            for _ in 0..10 {
                // Fisher-Yates
                for i in (1..order.len()).rev() {
                    let j = rng.random_range(0..=i);
                    order.swap(i, j);
                }
                assert!(w <= walk(&order), "MST {w} > walk over {order:?}");
            }
        }
    }

    #[test]
    fn cache_reuses_weights() {
        let mut cache = MstCache::new();
        let a: WaypointSet = coords(&[(0, 0), (0, 2), (2, 0)]).into_iter().collect();
        let b: WaypointSet = coords(&[(2, 0), (0, 0), (0, 2)]).into_iter().collect();

        assert_eq!(cache.weight(&a), 4);
        assert_eq!(cache.weight(&b), 4);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);

        let c = a.without(&Coord::new(0, 0)).unwrap();
        assert_eq!(cache.weight(&c), 4);
        assert_eq!(cache.len(), 2);
    }
}
