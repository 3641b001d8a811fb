use thiserror::Error;

use crate::space::Coord;

/// Why a search returned no path.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("The maze has no waypoints to visit")]
    NoWaypoints,
    #[error("No path from {start} reaches the remaining waypoints")]
    NoPath { start: Coord },
}
