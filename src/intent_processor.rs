//! Intent processing module
//!
//! Turns queued sensor samples and configuration updates into changes the
//! pipeline applies at the start of a render tick.

use alloc::boxed::Box;
use alloc::vec::Vec;

use log::warn;

use crate::channel::{Channel, Receiver, Sender};
use crate::config::LightConfig;
use crate::signal::{IntensitySample, SampleScale};

/// Message delivered to the render loop
#[derive(Debug, Clone)]
pub enum PipelineIntent {
    /// A new reading from the sensor feed
    Sample(IntensitySample),
    /// Replace the running configuration
    UpdateConfig(Box<LightConfig>),
}

/// Changes resulting from a batch of intents
#[derive(Debug, Clone, Default)]
pub struct IntentEffects {
    /// Validated configuration to switch to
    pub config: Option<LightConfig>,
    /// Profile derived from the most recent valid sample
    pub target: Option<Vec<f32>>,
}

impl IntentEffects {
    pub const fn has_effects(&self) -> bool {
        self.config.is_some() || self.target.is_some()
    }
}

pub type IntentSender<'a, const SIZE: usize> = Sender<'a, PipelineIntent, SIZE>;

pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, PipelineIntent, SIZE>;

pub type IntentChannel<const SIZE: usize> = Channel<PipelineIntent, SIZE>;

/// Drains the intent channel
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Process all pending intents (non-blocking).
    ///
    /// Intents apply in order: a sample queued after a config update is
    /// scaled with the new config, one queued before a resolution change is
    /// discarded. Invalid samples and configs are dropped
    /// with a warning and leave the previous state in effect.
    pub fn process_pending(&mut self, config: &LightConfig) -> IntentEffects {
        let mut effects = IntentEffects::default();

        while let Ok(intent) = self.intents.try_receive() {
            match intent {
                PipelineIntent::UpdateConfig(update) => match update.validate() {
                    Ok(()) => {
                        let active = effects.config.as_ref().unwrap_or(config);
                        // Earlier samples were resampled to the old resolution
                        if update.resolution != active.resolution {
                            effects.target = None;
                        }
                        effects.config = Some(*update);
                    }
                    Err(err) => warn!("rejected config update: {err}"),
                },
                PipelineIntent::Sample(sample) => {
                    let active = effects.config.as_ref().unwrap_or(config);
                    match sample.to_profile(&SampleScale::from(active), active.resolution) {
                        Ok(profile) => effects.target = Some(profile),
                        Err(err) => warn!("dropped sample: {err}"),
                    }
                }
            }
        }

        effects
    }
}
