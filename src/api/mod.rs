mod chart_config;
mod chart_style;
mod sensor_format;
mod time_chart;
mod time_range_filter;

pub use chart_config::TimeChartConfig;
pub use chart_style::ChartStyle;
pub use sensor_format::SensorType;
pub use time_chart::{
    ChartRangeSelector, TimeChart, TimeChartState, chart_projector, paint_time_chart,
    render_time_chart,
};
pub use time_range_filter::{
    FILTER_AXIS_PADDING_PX, TimeRangeFilter, filter_scale, render_time_range_filter,
};
