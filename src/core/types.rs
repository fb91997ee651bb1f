use serde::{Deserialize, Serialize};

/// Measured logical size (device-independent pixels) supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One sensor reading. `time` is epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Closed logical interval `[min, max]` over numbers or epoch milliseconds.
///
/// Serialized as a two-element array so hosts can pass `[min, max]` hints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Builds a domain from two bounds in either order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// A span of zero, or any non-finite bound, cannot be divided by.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        let span = self.span();
        span == 0.0 || !span.is_finite()
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Smallest domain covering every finite value, or `None` if there is none.
    pub fn enclosing<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut bounds: Option<Self> = None;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            bounds = Some(match bounds {
                Some(current) => current.union(Self::new(value, value)),
                None => Self::new(value, value),
            });
        }
        bounds
    }
}

impl From<(f64, f64)> for Domain {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

impl From<Domain> for (f64, f64) {
    fn from(domain: Domain) -> Self {
        (domain.min, domain.max)
    }
}

/// Pixel interval an axis occupies. `start` may exceed `end` for inverted axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.end - self.start).abs()
    }

    #[must_use]
    pub fn lower(self) -> f64 {
        self.start.min(self.end)
    }

    #[must_use]
    pub fn upper(self) -> f64 {
        self.start.max(self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Logical-pixel margins reserved around the plot area for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotInsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for PlotInsets {
    fn default() -> Self {
        Self {
            left: 56.0,
            top: 8.0,
            right: 16.0,
            bottom: 28.0,
        }
    }
}

impl PlotInsets {
    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self {
            left: inset,
            top: inset,
            right: inset,
            bottom: inset,
        }
    }

    /// Plot area left over inside `viewport`, or `None` when the insets eat it all.
    #[must_use]
    pub fn plot_size(self, viewport: Viewport) -> Option<(f64, f64)> {
        let width = f64::from(viewport.width) - self.left - self.right;
        let height = f64::from(viewport.height) - self.top - self.bottom;
        if width > 0.0 && height > 0.0 {
            Some((width, height))
        } else {
            None
        }
    }
}
