use derive_more::Display;
use num_traits::SaturatingAdd;
use num_traits::bounds::UpperBounded;
use ordered_float::FloatCore;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

/// A totally ordered floating point cost.
///
/// Used when heuristics are scaled by non-integer weights. Saturates at
/// infinity.
#[derive(Copy, Clone, Debug, Display)]
#[repr(transparent)]
#[display("{_0}")]
pub struct FloatCost<F: FloatCore>(OrderedFloat<F>);

impl<F: FloatCore> FloatCost<F> {
    pub fn new(f: F) -> Self {
        Self(OrderedFloat(f))
    }

    #[inline(always)]
    pub fn get(&self) -> F {
        self.0.0
    }
}

// Comparisons go through `OrderedFloat`. Deriving them would require `F: Ord`.
impl<F: FloatCore> PartialEq for FloatCost<F> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<F: FloatCore> Eq for FloatCost<F> {}

impl<F: FloatCore> PartialOrd for FloatCost<F> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<F: FloatCore> Ord for FloatCost<F> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<F: FloatCore> std::ops::Add for FloatCost<F> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.get() + rhs.get())
    }
}

impl<F: FloatCore> SaturatingAdd for FloatCost<F> {
    /// Float sums already saturate at infinity.
    #[inline(always)]
    fn saturating_add(&self, rhs: &Self) -> Self {
        *self + *rhs
    }
}

impl<F: FloatCore> UpperBounded for FloatCost<F> {
    fn max_value() -> Self {
        Self::new(F::infinity())
    }
}

impl<F> Cost for FloatCost<F>
where
    F: FloatCore + std::fmt::Debug + std::fmt::Display + From<u32>,
{
    #[inline(always)]
    fn from_steps(steps: u32) -> Self {
        Self::new(<F as From<u32>>::from(steps))
    }
}
