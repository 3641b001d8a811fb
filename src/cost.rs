use num_traits::SaturatingAdd;
use num_traits::bounds::UpperBounded;

/// Costs ranked by searches.
///
/// Path lengths are plain integers, but weighted heuristics need fractional
/// values (see [`crate::float_cost::FloatCost`]).
pub trait Cost:
    Copy + std::fmt::Debug + std::fmt::Display + Eq + Ord + SaturatingAdd + UpperBounded
{
    /// Lifts a number of grid steps into this cost.
    fn from_steps(steps: u32) -> Self;

    /// Whether the cost stayed below the saturation point.
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != Self::max_value()
    }
}

/// Number of unit moves on the grid.
pub type StepCost = u32;

impl Cost for StepCost {
    #[inline(always)]
    fn from_steps(steps: u32) -> Self {
        steps
    }
}
