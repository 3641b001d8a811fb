use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod data_structures;
pub mod error;
pub mod stats;

// Costs and heuristics
// --------------------
pub mod cost;
pub mod distance;
pub mod float_cost;
pub mod mst;
pub mod waypoints;

// Search space and problems
// -------------------------
pub mod problem;
pub mod search;
pub mod space;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
