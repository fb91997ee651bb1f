use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use crate::core::Domain;

pub const MILLIS_PER_SECOND: f64 = 1_000.0;
pub const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;

const MAX_TARGET_TICKS: usize = 64;
const MAX_GRID_TICKS: usize = 4 * MAX_TARGET_TICKS;

/// Clock-aligned steps for the time axis, ascending.
const TIME_INTERVALS_MS: &[f64] = &[
    MILLIS_PER_SECOND,
    2.0 * MILLIS_PER_SECOND,
    5.0 * MILLIS_PER_SECOND,
    10.0 * MILLIS_PER_SECOND,
    15.0 * MILLIS_PER_SECOND,
    30.0 * MILLIS_PER_SECOND,
    MILLIS_PER_MINUTE,
    2.0 * MILLIS_PER_MINUTE,
    5.0 * MILLIS_PER_MINUTE,
    10.0 * MILLIS_PER_MINUTE,
    15.0 * MILLIS_PER_MINUTE,
    30.0 * MILLIS_PER_MINUTE,
    MILLIS_PER_HOUR,
    2.0 * MILLIS_PER_HOUR,
    3.0 * MILLIS_PER_HOUR,
    6.0 * MILLIS_PER_HOUR,
    12.0 * MILLIS_PER_HOUR,
    MILLIS_PER_DAY,
];

pub type TickValues = SmallVec<[f64; 16]>;

/// Tick values for one axis plus the step they were generated with.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSet {
    pub values: TickValues,
    pub step: f64,
}

impl TickSet {
    fn single(value: f64) -> Self {
        let mut values = TickValues::new();
        if value.is_finite() {
            values.push(value);
        }
        Self { values, step: 0.0 }
    }
}

/// Step factor and exponent for a 1/2/5 x 10^n progression.
///
/// `None` when the span is too small or too large for a representable step.
fn nice_step_parts(span: f64, target_count: usize) -> Option<(f64, i32)> {
    let target = target_count.clamp(1, MAX_TARGET_TICKS) as f64;
    let raw = span / target;
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    let power = raw.log10().floor() as i32;
    let magnitude = 10f64.powi(power);
    if !magnitude.is_finite() || magnitude == 0.0 {
        return None;
    }
    let residual = raw / magnitude;
    let factor = if residual >= 50f64.sqrt() {
        10.0
    } else if residual >= 10f64.sqrt() {
        5.0
    } else if residual >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some((factor, power))
}

/// Grid indices `ceil(low)..=floor(high)`, or `None` when either bound is not
/// finite or the grid would hold more than [`MAX_GRID_TICKS`] ticks.
fn grid_indices(low: f64, high: f64) -> Option<RangeInclusive<i64>> {
    if !low.is_finite() || !high.is_finite() {
        return None;
    }
    let first = low.ceil();
    let last = high.floor();
    if last - first > MAX_GRID_TICKS as f64 {
        return None;
    }
    Some(first as i64..=last as i64)
}

/// Evenly spaced ticks on a 1/2/5 x 10^n grid covering `domain`.
///
/// Spans too narrow to step through fall back to a single tick at `domain.min`.
#[must_use]
pub fn linear_ticks(domain: Domain, target_count: usize) -> TickSet {
    if target_count == 0 {
        return TickSet {
            values: TickValues::new(),
            step: 0.0,
        };
    }
    if domain.is_degenerate() {
        return TickSet::single(domain.min);
    }
    let Some((factor, power)) = nice_step_parts(domain.span(), target_count) else {
        return TickSet::single(domain.min);
    };

    // Negative powers divide by an integral inverse so labels stay exact (0.3, not 0.30000000000000004).
    if power >= 0 {
        let step = factor * 10f64.powi(power);
        if !step.is_finite() {
            return TickSet::single(domain.min);
        }
        let Some(indices) = grid_indices(domain.min / step, domain.max / step) else {
            return TickSet::single(domain.min);
        };
        let values = indices.map(|index| index as f64 * step).collect();
        TickSet { values, step }
    } else {
        let inverse = 10f64.powi(-power) / factor;
        let Some(indices) = grid_indices(domain.min * inverse, domain.max * inverse) else {
            return TickSet::single(domain.min);
        };
        let values = indices.map(|index| index as f64 / inverse).collect();
        TickSet {
            values,
            step: 1.0 / inverse,
        }
    }
}

/// Picks the clock interval used for a time domain in epoch milliseconds.
///
/// Returns `0` when the span is too narrow for any step.
#[must_use]
pub fn time_tick_interval(domain: Domain, target_count: usize) -> f64 {
    let target = target_count.clamp(1, MAX_TARGET_TICKS) as f64;
    let raw = domain.span() / target;
    if raw < MILLIS_PER_SECOND {
        return nice_step_parts(domain.span(), target_count)
            .map_or(0.0, |(factor, power)| factor * 10f64.powi(power));
    }
    if let Some(interval) = TIME_INTERVALS_MS.iter().copied().find(|step| *step >= raw) {
        return interval;
    }

    nice_step_parts(domain.span() / MILLIS_PER_DAY, target_count)
        .map_or(1.0, |(factor, power)| (factor * 10f64.powi(power)).max(1.0))
        * MILLIS_PER_DAY
}

/// Ticks aligned to whole seconds, minutes, hours or UTC days.
#[must_use]
pub fn time_ticks(domain: Domain, target_count: usize) -> TickSet {
    if target_count == 0 {
        return TickSet {
            values: TickValues::new(),
            step: 0.0,
        };
    }
    if domain.is_degenerate() {
        return TickSet::single(domain.min);
    }

    let step = time_tick_interval(domain, target_count);
    if step < MILLIS_PER_SECOND {
        return linear_ticks(domain, target_count);
    }

    let Some(indices) = grid_indices(domain.min / step, domain.max / step) else {
        return TickSet::single(domain.min);
    };
    let values = indices.map(|index| index as f64 * step).collect();
    TickSet { values, step }
}

/// Formats a time tick with a precision suited to the tick step.
#[must_use]
pub fn format_time_tick(epoch_millis: f64, step: f64) -> String {
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(epoch_millis.round() as i64) else {
        return format!("{epoch_millis}");
    };
    let pattern = if step > 0.0 && step < MILLIS_PER_SECOND {
        "%H:%M:%S%.3f"
    } else if step < MILLIS_PER_MINUTE {
        "%H:%M:%S"
    } else if step < MILLIS_PER_DAY {
        "%H:%M"
    } else {
        "%Y-%m-%d"
    };
    dt.format(pattern).to_string()
}
