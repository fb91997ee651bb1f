use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_epoch_millis, epoch_millis_to_datetime};
use crate::core::ticks::{TickSet, linear_ticks, time_ticks};
use crate::core::{Domain, PixelRange};

/// Bidirectional mapping between a logical domain and a pixel range.
///
/// Implementations are plain values: they are rebuilt rather than mutated,
/// so axes, series and overlays drawn from the same scale always agree.
pub trait Scale {
    fn domain(&self) -> Domain;

    fn range(&self) -> PixelRange;

    fn project(&self, value: f64) -> f64;

    fn invert(&self, pixel: f64) -> f64;

    /// Ticks spanning the domain, aiming for roughly `target_count` of them.
    fn ticks(&self, target_count: usize) -> TickSet;

    fn length(&self) -> f64 {
        self.range().length()
    }
}

/// Affine scale over a numeric domain.
///
/// A degenerate domain (zero or non-finite span) maps every value to
/// `range.start` instead of producing `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: Domain,
    range: PixelRange,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: Domain, range: PixelRange) -> Self {
        Self { domain, range }
    }

    fn range_span(self) -> f64 {
        self.range.end - self.range.start
    }
}

impl Scale for LinearScale {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn range(&self) -> PixelRange {
        self.range
    }

    fn project(&self, value: f64) -> f64 {
        if self.domain.is_degenerate() {
            return self.range.start;
        }
        let normalized = (value - self.domain.min) / self.domain.span();
        self.range.start + normalized * self.range_span()
    }

    fn invert(&self, pixel: f64) -> f64 {
        let range_span = self.range_span();
        if self.domain.is_degenerate() || range_span == 0.0 || !range_span.is_finite() {
            return self.domain.min;
        }
        let normalized = (pixel - self.range.start) / range_span;
        self.domain.min + normalized * self.domain.span()
    }

    fn ticks(&self, target_count: usize) -> TickSet {
        linear_ticks(self.domain, target_count)
    }
}

/// Scale over a time domain expressed in epoch milliseconds.
///
/// Mapping is identical to [`LinearScale`]; ticks are aligned to clock and
/// calendar boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain: Domain, range: PixelRange) -> Self {
        Self {
            inner: LinearScale::new(domain, range),
        }
    }

    #[must_use]
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>, range: PixelRange) -> Self {
        Self::new(
            Domain::new(datetime_to_epoch_millis(start), datetime_to_epoch_millis(end)),
            range,
        )
    }

    #[must_use]
    pub fn project_datetime(&self, time: DateTime<Utc>) -> f64 {
        self.inner.project(datetime_to_epoch_millis(time))
    }

    #[must_use]
    pub fn invert_datetime(&self, pixel: f64) -> Option<DateTime<Utc>> {
        epoch_millis_to_datetime(self.inner.invert(pixel))
    }
}

impl Scale for TimeScale {
    fn domain(&self) -> Domain {
        self.inner.domain()
    }

    fn range(&self) -> PixelRange {
        self.inner.range()
    }

    fn project(&self, value: f64) -> f64 {
        self.inner.project(value)
    }

    fn invert(&self, pixel: f64) -> f64 {
        self.inner.invert(pixel)
    }

    fn ticks(&self, target_count: usize) -> TickSet {
        time_ticks(self.inner.domain(), target_count)
    }
}
