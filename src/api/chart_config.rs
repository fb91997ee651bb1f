use serde::{Deserialize, Serialize};

use crate::core::{Domain, PlotInsets};
use crate::error::{ChartError, ChartResult};

use super::{ChartStyle, SensorType};

/// Host-facing setup for one time chart.
///
/// Serializable so pages can keep chart setup in JSON; absent fields take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeChartConfig {
    pub sensor_type: SensorType,
    /// Fixed time window forced into the x-domain, in epoch milliseconds.
    pub epoch_range: Option<Domain>,
    /// Value band forced into the y-domain.
    pub target_range: Option<Domain>,
    pub device_pixel_ratio: f64,
    pub plot_insets: PlotInsets,
    pub style: ChartStyle,
}

impl Default for TimeChartConfig {
    fn default() -> Self {
        Self {
            sensor_type: SensorType::Generic,
            epoch_range: None,
            target_range: None,
            device_pixel_ratio: 1.0,
            plot_insets: PlotInsets::default(),
            style: ChartStyle::default(),
        }
    }
}

impl TimeChartConfig {
    #[must_use]
    pub fn new(sensor_type: SensorType) -> Self {
        Self {
            sensor_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_epoch_range(mut self, epoch_range: Domain) -> Self {
        self.epoch_range = Some(epoch_range);
        self
    }

    #[must_use]
    pub fn with_target_range(mut self, target_range: Domain) -> Self {
        self.target_range = Some(target_range);
        self
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, device_pixel_ratio: f64) -> Self {
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_plot_insets(mut self, plot_insets: PlotInsets) -> Self {
        self.plot_insets = plot_insets;
        self
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ChartError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| ChartError::Config(err.to_string()))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::Config(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        let insets = self.plot_insets;
        if [insets.left, insets.top, insets.right, insets.bottom]
            .iter()
            .any(|inset| !inset.is_finite() || *inset < 0.0)
        {
            return Err(ChartError::Config(
                "plot insets must be finite and >= 0".to_owned(),
            ));
        }
        for (name, range) in [
            ("epoch range", self.epoch_range),
            ("target range", self.target_range),
        ] {
            let Some(range) = range else {
                continue;
            };
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(ChartError::Config(format!("{name} must be finite")));
            }
        }
        self.style.validate()
    }
}
