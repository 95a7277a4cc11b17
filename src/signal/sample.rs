use alloc::vec::Vec;

use serde::Deserialize;

use super::resample;
use crate::config::LightConfig;
use crate::error::{Error, Result};

/// One reading of the sensor feed, `{ "d": [...] }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntensitySample {
    #[serde(rename = "d")]
    pub values: Vec<f32>,
}

/// Window and linear mapping applied to raw sensor values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleScale {
    pub start_index: usize,
    pub index_range: usize,
    pub input_min: f32,
    pub input_max: f32,
    pub output_min: f32,
    pub output_max: f32,
}

impl From<&LightConfig> for SampleScale {
    fn from(config: &LightConfig) -> Self {
        Self {
            start_index: config.start_index,
            index_range: config.index_range,
            input_min: config.input_min,
            input_max: config.input_max,
            output_min: config.output_min,
            output_max: config.output_max,
        }
    }
}

impl SampleScale {
    /// Map a raw value from the input range onto the output range
    pub fn apply(&self, value: f32) -> f32 {
        let normalized = (value - self.input_min) / (self.input_max - self.input_min);
        round2(normalized * (self.output_max - self.output_min) + self.output_min)
    }
}

impl IntensitySample {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|_| Error::InvalidInput("sample is not {\"d\": [...]}"))
    }

    /// Values inside the configured window; the window is clipped to the sample
    pub fn window(&self, scale: &SampleScale) -> &[f32] {
        let start = scale.start_index.min(self.values.len());
        let end = start.saturating_add(scale.index_range).min(self.values.len());
        &self.values[start..end]
    }

    /// Trim, scale and resample into a profile of `resolution` values
    #[allow(clippy::float_cmp)]
    pub fn to_profile(&self, scale: &SampleScale, resolution: usize) -> Result<Vec<f32>> {
        if scale.input_max == scale.input_min {
            return Err(Error::InvalidInput("input range is empty"));
        }
        let scaled: Vec<f32> = self
            .window(scale)
            .iter()
            .map(|value| scale.apply(*value))
            .collect();
        if scaled.iter().any(|value| !value.is_finite()) {
            return Err(Error::InvalidInput("sample contains non-finite values"));
        }
        resample(&scaled, resolution)
    }
}

/// Round to two decimal places
pub fn round2(value: f32) -> f32 {
    libm::roundf(value * 100.0) / 100.0
}
