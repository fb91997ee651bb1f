//! diagnostics-chart: time-series charting for instrument telemetry.
//!
//! Samples are projected through a time scale and a linear value scale,
//! painted with labelled axes onto an owned surface, and can be narrowed
//! through a drag-to-select range selector or a backing time range filter.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimeChart, TimeChartConfig, TimeRangeFilter};
pub use error::{ChartError, ChartResult};
