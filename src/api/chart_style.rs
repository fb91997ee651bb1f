use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, StrokeStyle, TextStyle, TickStyle};

/// Visual parameters shared by the time chart and the range filter.
///
/// Every field has a default, so JSON may override any subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartStyle {
    pub series_line: StrokeStyle,
    pub point_radius: f64,
    pub point_color: Color,
    pub axis_line: StrokeStyle,
    pub tick_mark: StrokeStyle,
    pub tick_label: TextStyle,
    pub tick_size: f64,
    pub tick_padding: f64,
    pub x_tick_count: usize,
    pub y_tick_count: usize,
    pub selection_fill: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let axis_gray = Color::rgb(0.35, 0.37, 0.40);
        Self {
            series_line: StrokeStyle::new(Color::rgb(0.16, 0.44, 0.78), 1.5),
            point_radius: 2.5,
            point_color: Color::rgb(0.16, 0.44, 0.78),
            axis_line: StrokeStyle::new(axis_gray, 1.0),
            tick_mark: StrokeStyle::new(axis_gray, 1.0),
            tick_label: TextStyle::new(Color::rgb(0.20, 0.22, 0.25), 11.0),
            tick_size: 5.0,
            tick_padding: 3.0,
            x_tick_count: 6,
            y_tick_count: 5,
            selection_fill: Color::rgba(0.16, 0.44, 0.78, 0.25),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn tick_style(&self) -> TickStyle {
        TickStyle {
            mark: self.tick_mark,
            label: self.tick_label,
            size: self.tick_size,
            padding: self.tick_padding,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.series_line.validate()?;
        self.axis_line.validate()?;
        self.tick_mark.validate()?;
        self.tick_label.validate()?;
        self.point_color.validate()?;
        self.selection_fill.validate()?;

        if !self.point_radius.is_finite() || self.point_radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "point radius must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("tick size", self.tick_size),
            ("tick padding", self.tick_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.x_tick_count == 0 || self.y_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "tick counts must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ChartStyle;

    #[test]
    fn default_style_is_valid() {
        assert!(ChartStyle::default().validate().is_ok());
    }

    #[test]
    fn zero_tick_count_is_rejected() {
        let style = ChartStyle {
            y_tick_count: 0,
            ..ChartStyle::default()
        };
        assert!(style.validate().is_err());
    }
}
