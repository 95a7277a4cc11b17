//! Sensor signal intake: trimming, scaling and resampling to a profile

mod resample;
mod sample;

pub use resample::resample;
pub use sample::{IntensitySample, SampleScale, round2};
