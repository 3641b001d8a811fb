use smallvec::SmallVec;

use crate::cost::StepCost;
use crate::distance::manhattan;
use crate::space::Coord;

/// Waypoints most mazes fit without spilling to the heap.
const INLINE_WAYPOINTS: usize = 8;

/// The waypoints a search branch still has to visit.
///
/// Kept sorted and deduplicated so equal sets hash and compare equal no matter
/// the order they were built from. Branches never share mutations, visiting a
/// waypoint builds a new set.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WaypointSet {
    coords: SmallVec<[Coord; INLINE_WAYPOINTS]>,
}

impl WaypointSet {
    pub fn new() -> Self {
        Self {
            coords: SmallVec::new_const(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline(always)]
    pub fn contains(&self, c: &Coord) -> bool {
        self.coords.binary_search(c).is_ok()
    }

    /// The set without `c`.
    ///
    /// Returns `None` when `c` wasn't part of the set, so callers can keep
    /// sharing the current one.
    #[must_use]
    pub fn without(&self, c: &Coord) -> Option<WaypointSet> {
        let i = self.coords.binary_search(c).ok()?;
        let mut coords = self.coords.clone();
        coords.remove(i);
        Some(Self { coords })
    }

    /// Distance from `c` to the closest waypoint, 0 when there's none left.
    #[must_use]
    pub fn nearest_distance(&self, c: &Coord) -> StepCost {
        self.coords
            .iter()
            .map(|w| manhattan(c, w))
            .min()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.coords.iter()
    }
}

impl FromIterator<Coord> for WaypointSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut coords: SmallVec<[Coord; INLINE_WAYPOINTS]> = iter.into_iter().collect();
        coords.sort_unstable();
        coords.dedup();
        Self { coords }
    }
}

impl<'a> IntoIterator for &'a WaypointSet {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for WaypointSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use std::hash::BuildHasher;

    use rustc_hash::FxBuildHasher;

    use super::*;

    #[test]
    fn order_insensitive() {
        let a: WaypointSet = [Coord::new(2, 0), Coord::new(0, 2)].into_iter().collect();
        let b: WaypointSet = [Coord::new(0, 2), Coord::new(2, 0), Coord::new(0, 2)]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_eq!(b.len(), 2);
        assert_eq!(FxBuildHasher.hash_one(&a), FxBuildHasher.hash_one(&b));
    }

    #[test]
    fn without_builds_a_new_set() {
        let a: WaypointSet = [Coord::new(2, 0), Coord::new(0, 2)].into_iter().collect();
        let b = a.without(&Coord::new(0, 2)).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 1);
        assert!(b.contains(&Coord::new(2, 0)));
        assert!(!b.contains(&Coord::new(0, 2)));
        assert_eq!(a.without(&Coord::new(1, 1)), None);
    }

    #[test]
    fn nearest_distance() {
        let a: WaypointSet = [Coord::new(2, 0), Coord::new(0, 5)].into_iter().collect();
        assert_eq!(a.nearest_distance(&Coord::new(0, 0)), 2);
        assert_eq!(a.nearest_distance(&Coord::new(0, 4)), 1);
        assert_eq!(WaypointSet::new().nearest_distance(&Coord::new(0, 4)), 0);
    }

    #[test]
    fn display() {
        let a: WaypointSet = [Coord::new(2, 0), Coord::new(0, 5)].into_iter().collect();
        assert_eq!(a.to_string(), "{(0,5), (2,0)}");
    }
}
