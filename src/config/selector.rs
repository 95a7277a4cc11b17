//! On-screen parameter selector
//!
//! A small state machine over the runtime-adjustable tunables. It never mutates
//! the live configuration; adjustments produce a new [`LightConfig`] that is
//! delivered to the render loop as an update intent.

use crate::config::{LightConfig, round_speed};

/// Tunables reachable from the selector, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    MaxValue,
    StartIndex,
    IndexRange,
    InputMin,
    InputMax,
    OutputMin,
    OutputMax,
    SmoothingSpeed,
    BrightnessFactor,
    SaturationFactor,
}

impl Parameter {
    pub const ALL: [Self; 10] = [
        Self::MaxValue,
        Self::StartIndex,
        Self::IndexRange,
        Self::InputMin,
        Self::InputMax,
        Self::OutputMin,
        Self::OutputMax,
        Self::SmoothingSpeed,
        Self::BrightnessFactor,
        Self::SaturationFactor,
    ];

    /// Config key of the parameter
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxValue => "maxValue",
            Self::StartIndex => "startIndex",
            Self::IndexRange => "indexRange",
            Self::InputMin => "inputMin",
            Self::InputMax => "inputMax",
            Self::OutputMin => "outputMin",
            Self::OutputMax => "outputMax",
            Self::SmoothingSpeed => "smoothingSpeed",
            Self::BrightnessFactor => "brightnessFactor",
            Self::SaturationFactor => "saturationFactor",
        }
    }

    /// Amount added or removed by one adjustment
    pub const fn step(self) -> f32 {
        match self {
            Self::MaxValue | Self::InputMin | Self::InputMax => 500.0,
            Self::OutputMin | Self::OutputMax => 1_000.0,
            Self::StartIndex | Self::IndexRange => 10.0,
            Self::SmoothingSpeed => 0.001,
            Self::BrightnessFactor | Self::SaturationFactor => 0.05,
        }
    }

    /// Current value as shown to the user
    pub fn value(self, config: &LightConfig) -> f32 {
        match self {
            Self::MaxValue => config.max_value,
            Self::StartIndex => config.start_index as f32,
            Self::IndexRange => config.index_range as f32,
            Self::InputMin => config.input_min,
            Self::InputMax => config.input_max,
            Self::OutputMin => config.output_min,
            Self::OutputMax => config.output_max,
            Self::SmoothingSpeed => config.smoothing_speed,
            Self::BrightnessFactor => config.brightness_factor,
            Self::SaturationFactor => config.saturation_factor,
        }
    }

    /// Apply `steps` adjustments, keeping the value inside its valid range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn adjust(self, config: &mut LightConfig, steps: i32) {
        let delta = self.step() * steps as f32;
        let shift_index = |value: usize, min: usize| {
            let shifted = value as f32 + delta;
            (shifted.max(min as f32)) as usize
        };
        match self {
            Self::MaxValue => config.max_value = (config.max_value + delta).max(self.step()),
            Self::StartIndex => config.start_index = shift_index(config.start_index, 0),
            Self::IndexRange => config.index_range = shift_index(config.index_range, 2),
            Self::InputMin => config.input_min += delta,
            Self::InputMax => config.input_max += delta,
            Self::OutputMin => config.output_min += delta,
            Self::OutputMax => config.output_max += delta,
            Self::SmoothingSpeed => {
                config.smoothing_speed =
                    round_speed((config.smoothing_speed + delta).clamp(self.step(), 1.0));
            }
            Self::BrightnessFactor => {
                config.brightness_factor = (config.brightness_factor + delta).max(0.0);
            }
            Self::SaturationFactor => {
                config.saturation_factor = (config.saturation_factor + delta).max(0.0);
            }
        }
    }
}

/// Selector state: which parameter is highlighted and whether the overlay is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterSelector {
    selected_index: usize,
    visible: bool,
}

impl ParameterSelector {
    pub const fn new() -> Self {
        Self {
            selected_index: 0,
            visible: false,
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub const fn selected(&self) -> Parameter {
        Parameter::ALL[self.selected_index]
    }

    /// Show or hide the overlay
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Highlight the next parameter, wrapping at the end.
    ///
    /// Ignored while hidden.
    pub fn next(&mut self) {
        if self.visible {
            self.selected_index = (self.selected_index + 1) % Parameter::ALL.len();
        }
    }

    /// Highlight the previous parameter, wrapping at the start.
    ///
    /// Ignored while hidden.
    pub fn previous(&mut self) {
        if self.visible {
            self.selected_index =
                (self.selected_index + Parameter::ALL.len() - 1) % Parameter::ALL.len();
        }
    }

    /// Config with the selected parameter raised by one step
    ///
    /// Returns `None` while hidden.
    pub fn increase(&self, config: &LightConfig) -> Option<LightConfig> {
        self.adjusted(config, 1)
    }

    /// Config with the selected parameter lowered by one step
    ///
    /// Returns `None` while hidden.
    pub fn decrease(&self, config: &LightConfig) -> Option<LightConfig> {
        self.adjusted(config, -1)
    }

    fn adjusted(&self, config: &LightConfig, steps: i32) -> Option<LightConfig> {
        if !self.visible {
            return None;
        }
        let mut updated = config.clone();
        self.selected().adjust(&mut updated, steps);
        Some(updated)
    }
}
