use serde::{Deserialize, Serialize};

use crate::core::Sample;
use crate::core::primitives::parse_timestamp;
use crate::error::{ChartError, ChartResult};

/// Timestamp as delivered by the host: epoch milliseconds or an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    EpochMillis(f64),
    Iso(String),
}

impl TimeInput {
    pub fn to_epoch_millis(&self) -> ChartResult<f64> {
        match self {
            Self::EpochMillis(millis) if millis.is_finite() => Ok(*millis),
            Self::EpochMillis(_) => Err(ChartError::InvalidTimestamp(
                "epoch time must be finite".to_owned(),
            )),
            Self::Iso(text) => parse_timestamp(text),
        }
    }
}

/// Undecoded `{time, value}` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub time: TimeInput,
    pub value: f64,
}

impl TryFrom<RawSample> for Sample {
    type Error = ChartError;

    fn try_from(raw: RawSample) -> ChartResult<Self> {
        Ok(Sample::new(raw.time.to_epoch_millis()?, raw.value))
    }
}

/// Decodes a JSON array of `{time, value}` records into samples, preserving order.
pub fn samples_from_json(json: &str) -> ChartResult<Vec<Sample>> {
    let raw: Vec<RawSample> = serde_json::from_str(json)
        .map_err(|err| ChartError::InvalidData(format!("sample payload: {err}")))?;
    raw.into_iter().map(Sample::try_from).collect()
}
