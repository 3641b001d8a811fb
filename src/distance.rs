use crate::cost::StepCost;
use crate::space::Coord;

/// The distance of following straight lines
///
/// ```
/// use waypoint_search::distance::manhattan;
/// use waypoint_search::space::Coord;
/// assert_eq!(manhattan(&Coord::new(0, 0), &Coord::new(2, 2)), 4);
/// assert_eq!(manhattan(&Coord::new(3, -1), &Coord::new(1, 1)), 4);
/// ```
#[inline(always)]
#[must_use]
pub fn manhattan(a: &Coord, b: &Coord) -> StepCost {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}
