use crate::space::Coord;
use crate::space::Space;

/// A maze instance: a [`Space`] plus where to start and what to visit.
pub trait Problem: std::fmt::Debug {
    type Sp: Space;

    fn space(&self) -> &Self::Sp;
    fn start(&self) -> Coord;
    /// All the cells that must be visited, in a stable order.
    fn waypoints(&self) -> &[Coord];

    fn is_waypoint(&self, c: &Coord) -> bool {
        self.waypoints().contains(c)
    }

    #[inline(always)]
    fn navigable(&self, c: &Coord) -> bool {
        self.space().navigable(c)
    }

    #[inline(always)]
    fn neighbours(&self, c: &Coord) -> Vec<Coord> {
        self.space().neighbours(c)
    }
}
