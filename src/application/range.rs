// Range calculator - Padded value-axis bounds from normalized temperatures
use crate::domain::chart::DisplayRange;
use crate::domain::temperature::{FALLBACK_TEMPERATURE, NormalizedTemperature};
use serde::Deserialize;

const RANGE_PADDING: i64 = 5;
const EMPTY_RANGE: DisplayRange = DisplayRange { min: 0, max: 30 };

/// Which normalized values take part in the range computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Every genuine reading, including a real 0 °C.
    #[default]
    ValidReadings,
    /// Every value other than 0, so a genuine 0 °C reading is dropped along
    /// with the fallbacks.
    NonZero,
}

impl RangePolicy {
    fn includes(self, temperature: &NormalizedTemperature) -> bool {
        match self {
            RangePolicy::ValidReadings => temperature.valid,
            RangePolicy::NonZero => temperature.value != FALLBACK_TEMPERATURE,
        }
    }
}

pub fn compute_display_range(
    temperatures: &[NormalizedTemperature],
    policy: RangePolicy,
) -> DisplayRange {
    let bounds = temperatures
        .iter()
        .filter(|t| policy.includes(t))
        .map(|t| t.value)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    let Some((lo, hi)) = bounds else {
        return EMPTY_RANGE;
    };

    // `as` saturates at the i64 limits, so an overflowing pad catches those too
    let min = (lo.floor() as i64).checked_sub(RANGE_PADDING);
    let max = (hi.ceil() as i64).checked_add(RANGE_PADDING);
    match (min, max) {
        (Some(min), Some(max)) => DisplayRange::new(min, max),
        _ => {
            tracing::warn!(
                "temperatures {}..{} exceed the axis range, using {}..{}",
                lo,
                hi,
                EMPTY_RANGE.min,
                EMPTY_RANGE.max
            );
            EMPTY_RANGE
        }
    }
}
