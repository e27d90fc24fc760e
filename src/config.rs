/// The canonical orientation the repair engine commits outer rings to.
/// Inner (hole) rings are oriented the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Clockwise,
    CounterClockwise,
}

impl Order {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Order::Clockwise => Order::CounterClockwise,
            Order::CounterClockwise => Order::Clockwise,
        }
    }

    /// Whether a ring with the given signed area already matches this order.
    pub(crate) fn matches_area(self, signed_area: f64) -> bool {
        match self {
            Order::CounterClockwise => signed_area >= 0.0,
            Order::Clockwise => signed_area <= 0.0,
        }
    }
}

/// Tunables for [`crate::correct`] / [`crate::correct_odd_even`].
///
/// `RepairConfig::default()` reproduces the defaults of the original
/// implementation this engine is based on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairConfig {
    /// Orientation outer rings are normalized to (inners get the opposite).
    pub order: Order,
    /// Minimum absolute area a traced sub-ring must have to survive; discards
    /// numerical slivers produced by near-collinear self-touches. `0.0` keeps
    /// every non-degenerate sub-ring.
    pub spike_threshold: f64,
    /// Recursion bound on hole-of-hole-of-hole nesting. Valid OGC input never
    /// nests holes, but malformed input can nest arbitrarily; past this depth
    /// a hole is treated as empty rather than recursed into further.
    pub max_hole_depth: usize,
}

impl Default for RepairConfig {
    fn default() -> Self {
        RepairConfig {
            order: Order::CounterClockwise,
            spike_threshold: 0.0,
            max_hole_depth: 16,
        }
    }
}
