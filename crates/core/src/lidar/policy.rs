//! Plausible-range policy for decoded distances
//!
//! Two deployments exist: one discards readings outside an open interval,
//! the other clamps far readings to a ceiling and always reports.

/// Default lower bound (exclusive) for [`RangePolicy::Reject`]
pub const DEFAULT_REJECT_MIN: u16 = 0;

/// Default upper bound (exclusive) for [`RangePolicy::Reject`]
pub const DEFAULT_REJECT_MAX: u16 = 1200;

/// Default ceiling for [`RangePolicy::Clamp`]
pub const DEFAULT_CLAMP_CEILING: u16 = 70;

/// Range policy applied to every checksum-valid frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePolicy {
    /// Emit only when `min < distance < max`
    Reject { min: u16, max: u16 },
    /// Reduce `distance >= ceiling` to `ceiling`, always emit
    Clamp { ceiling: u16 },
}

impl Default for RangePolicy {
    fn default() -> Self {
        RangePolicy::Clamp {
            ceiling: DEFAULT_CLAMP_CEILING,
        }
    }
}

impl RangePolicy {
    /// Reject policy with the stock `(0, 1200)` window
    pub const fn reject_default() -> Self {
        RangePolicy::Reject {
            min: DEFAULT_REJECT_MIN,
            max: DEFAULT_REJECT_MAX,
        }
    }

    /// Apply the policy.
    ///
    /// Returns the distance to report and whether it was clamped, or `None`
    /// when the reading must be suppressed.
    pub fn apply(&self, distance: u16) -> Option<(u16, bool)> {
        match *self {
            RangePolicy::Reject { min, max } => {
                if distance > min && distance < max {
                    Some((distance, false))
                } else {
                    None
                }
            }
            RangePolicy::Clamp { ceiling } => {
                if distance >= ceiling {
                    Some((ceiling, distance != ceiling))
                } else {
                    Some((distance, false))
                }
            }
        }
    }

    /// Distance at and beyond which nothing counts as a detected object.
    pub fn ceiling(&self) -> u16 {
        match *self {
            RangePolicy::Reject { max, .. } => max,
            RangePolicy::Clamp { ceiling } => ceiling,
        }
    }

    /// Parameter-store encoding (0 = reject, 1 = clamp)
    pub fn kind_id(&self) -> i32 {
        match self {
            RangePolicy::Reject { .. } => 0,
            RangePolicy::Clamp { .. } => 1,
        }
    }
}
