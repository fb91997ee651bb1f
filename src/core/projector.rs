use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Domain, LinearScale, PixelPoint, PixelRange, Sample, Scale, TimeScale};

/// Which sample field feeds an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SampleField {
    Time,
    Value,
}

impl SampleField {
    #[must_use]
    pub fn read(self, sample: &Sample) -> f64 {
        match self {
            Self::Time => sample.time,
            Self::Value => sample.value,
        }
    }
}

/// Everything a projector is derived from.
#[derive(Debug, Clone, Copy)]
pub struct ProjectorInput<'a> {
    pub samples: &'a [Sample],
    pub x_field: SampleField,
    pub y_field: SampleField,
    /// Plot-area width in logical pixels; `None` until the host has measured.
    pub pixel_width: Option<f64>,
    pub pixel_height: Option<f64>,
    /// Top-left corner of the plot area on the surface.
    pub origin_hint: PixelPoint,
    pub extra_x_domain: Option<Domain>,
    pub extra_y_domain: Option<Domain>,
}

impl<'a> ProjectorInput<'a> {
    #[must_use]
    pub fn new(samples: &'a [Sample]) -> Self {
        Self {
            samples,
            x_field: SampleField::Time,
            y_field: SampleField::Value,
            pixel_width: None,
            pixel_height: None,
            origin_hint: PixelPoint::default(),
            extra_x_domain: None,
            extra_y_domain: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, pixel_width: f64, pixel_height: f64) -> Self {
        self.pixel_width = Some(pixel_width);
        self.pixel_height = Some(pixel_height);
        self
    }

    #[must_use]
    pub fn with_origin_hint(mut self, origin_hint: PixelPoint) -> Self {
        self.origin_hint = origin_hint;
        self
    }

    #[must_use]
    pub fn with_extra_x_domain(mut self, domain: Option<Domain>) -> Self {
        self.extra_x_domain = domain;
        self
    }

    #[must_use]
    pub fn with_extra_y_domain(mut self, domain: Option<Domain>) -> Self {
        self.extra_y_domain = domain;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, x_field: SampleField, y_field: SampleField) -> Self {
        self.x_field = x_field;
        self.y_field = y_field;
        self
    }
}

/// Immutable coordinate-transform snapshot for one chart frame.
///
/// Scales work in plot-local pixels: x grows right from `0`, y grows
/// downward from the plot top so larger values sit higher. `origin` is the
/// bottom-left corner of the plot on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    x_scale: TimeScale,
    y_scale: LinearScale,
    offset: PixelPoint,
    origin: PixelPoint,
    samples: Vec<Sample>,
    points: Vec<PixelPoint>,
}

fn extend_domain(base: Option<Domain>, extra: Option<Domain>) -> Option<Domain> {
    match (base, extra) {
        (Some(base), Some(extra)) => Some(base.union(extra)),
        (base, extra) => base.or(extra),
    }
}

fn measured(dimension: Option<f64>) -> Option<f64> {
    dimension.filter(|value| value.is_finite() && *value > 0.0)
}

/// Builds a projector, or `None` while dimensions are unknown or there is
/// nothing to span.
#[must_use]
pub fn build_projector(input: ProjectorInput<'_>) -> Option<Projector> {
    let width = measured(input.pixel_width)?;
    let height = measured(input.pixel_height)?;

    let samples: Vec<Sample> = input
        .samples
        .iter()
        .copied()
        .filter(|sample| {
            input.x_field.read(sample).is_finite() && input.y_field.read(sample).is_finite()
        })
        .collect();
    let dropped = input.samples.len() - samples.len();
    if dropped > 0 {
        warn!(dropped, "dropping samples with non-finite coordinates");
    }

    let x_domain = extend_domain(
        Domain::enclosing(samples.iter().map(|sample| input.x_field.read(sample))),
        input.extra_x_domain,
    )?;
    let y_domain = extend_domain(
        Domain::enclosing(samples.iter().map(|sample| input.y_field.read(sample))),
        input.extra_y_domain,
    )?;

    let x_scale = TimeScale::new(x_domain, PixelRange::new(0.0, width));
    let y_scale = LinearScale::new(y_domain, PixelRange::new(height, 0.0));
    let points = project_samples(&samples, input.x_field, input.y_field, &x_scale, &y_scale);

    debug!(
        points = points.len(),
        x_min = x_domain.min,
        x_max = x_domain.max,
        y_min = y_domain.min,
        y_max = y_domain.max,
        "built projector"
    );

    Some(Projector {
        x_scale,
        y_scale,
        offset: input.origin_hint,
        origin: PixelPoint::new(input.origin_hint.x, input.origin_hint.y + height),
        samples,
        points,
    })
}

#[cfg(not(feature = "parallel-projection"))]
fn project_samples(
    samples: &[Sample],
    x_field: SampleField,
    y_field: SampleField,
    x_scale: &TimeScale,
    y_scale: &LinearScale,
) -> Vec<PixelPoint> {
    samples
        .iter()
        .map(|sample| {
            PixelPoint::new(
                x_scale.project(x_field.read(sample)),
                y_scale.project(y_field.read(sample)),
            )
        })
        .collect()
}

#[cfg(feature = "parallel-projection")]
fn project_samples(
    samples: &[Sample],
    x_field: SampleField,
    y_field: SampleField,
    x_scale: &TimeScale,
    y_scale: &LinearScale,
) -> Vec<PixelPoint> {
    use rayon::prelude::*;

    samples
        .par_iter()
        .map(|sample| {
            PixelPoint::new(
                x_scale.project(x_field.read(sample)),
                y_scale.project(y_field.read(sample)),
            )
        })
        .collect()
}

impl Projector {
    #[must_use]
    pub fn x_scale(&self) -> &TimeScale {
        &self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Bottom-left corner of the plot area in surface coordinates.
    #[must_use]
    pub fn origin(&self) -> PixelPoint {
        self.origin
    }

    /// Top-left corner of the plot area in surface coordinates.
    #[must_use]
    pub fn offset(&self) -> PixelPoint {
        self.offset
    }

    /// Projected points in plot-local pixels, in input order.
    #[must_use]
    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.x_scale.length()
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        self.y_scale.length()
    }

    #[must_use]
    pub fn to_surface(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(point.x + self.offset.x, point.y + self.offset.y)
    }

    /// Projected points translated onto the surface.
    #[must_use]
    pub fn surface_points(&self) -> Vec<PixelPoint> {
        self.points
            .iter()
            .map(|point| self.to_surface(*point))
            .collect()
    }

    /// Sample whose projected x is closest to a plot-local pixel.
    #[must_use]
    pub fn nearest_sample(&self, local_x: f64) -> Option<(Sample, PixelPoint)> {
        if !local_x.is_finite() {
            return None;
        }
        self.samples
            .iter()
            .zip(&self.points)
            .min_by_key(|(_, point)| OrderedFloat((point.x - local_x).abs()))
            .map(|(sample, point)| (*sample, *point))
    }
}
