//! Render/compute loop
//!
//! One tick runs smoother, renderer, color transformer and packer in order and
//! leaves the result in the shared [`UniverseStore`].

use embassy_time::{Duration, Instant};
use log::{error, info, warn};

use crate::Periodic;
use crate::config::LightConfig;
use crate::error::Result;
use crate::filter::{ColorTransformer, ColorTransformerConfig};
use crate::frame::BaseImage;
use crate::intent_processor::{IntentEffects, IntentProcessor, IntentReceiver};
use crate::packer::{UniverseLayout, UniversePacker};
use crate::rasterizer::{EffectParams, Rasterizer};
use crate::renderer::{ColumnRecord, ProfileRenderer};
use crate::smoother::ProfileSmoother;
use crate::universe::UniverseStore;

/// Lighting pipeline - the render loop orchestrator
pub struct Pipeline<'a, R: Rasterizer, const INTENT_CHANNEL_SIZE: usize> {
    // External dependencies and configuration
    intent_processor: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
    store: &'a UniverseStore,
    config: LightConfig,
    base: Option<BaseImage>,

    // Internal state
    started: Option<Instant>,

    // Internal dependencies
    smoother: ProfileSmoother,
    renderer: ProfileRenderer<R>,
    transformer: ColorTransformer,
    packer: UniversePacker,
}

impl<'a, R: Rasterizer, const INTENT_CHANNEL_SIZE: usize> Pipeline<'a, R, INTENT_CHANNEL_SIZE> {
    /// Create a pipeline writing into `store`.
    ///
    /// Fails when the configuration does not fit the universe layout.
    pub fn new(
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
        store: &'a UniverseStore,
        rasterizer: R,
        config: LightConfig,
    ) -> Result<Self> {
        config.validate()?;
        let packer = UniversePacker::new(UniverseLayout::from(&config))?;
        packer.register(store)?;

        Ok(Self {
            intent_processor: IntentProcessor::new(intents),
            store,
            base: None,
            started: None,
            smoother: ProfileSmoother::new(config.smoothing_speed),
            renderer: ProfileRenderer::new(rasterizer, config.max_value),
            transformer: ColorTransformer::new(&ColorTransformerConfig::from(&config)),
            packer,
            config,
        })
    }

    #[must_use]
    pub fn with_base_image(mut self, image: BaseImage) -> Self {
        self.set_base_image(image);
        self
    }

    /// Provide the base image; ticks are no-ops until one is set
    pub fn set_base_image(&mut self, image: BaseImage) {
        self.base = Some(image);
    }

    pub const fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Displayed profile, `None` before the first sample
    pub fn displayed(&self) -> Option<&[f32]> {
        self.smoother.current()
    }

    /// Column records of the last rendered frame
    pub fn records(&self) -> &[ColumnRecord] {
        self.renderer.records()
    }

    pub fn renderer(&self) -> &ProfileRenderer<R> {
        &self.renderer
    }

    /// Process one frame
    ///
    /// Returns the number of positions whose fixtures were rewritten.
    pub fn render(&mut self, now: Instant) -> Result<usize> {
        self.process_intents()?;

        let Some(base) = &self.base else {
            return Ok(0);
        };
        let resolution = self.packer.layout().resolution;
        let Some(profile) = self.smoother.tick() else {
            return Ok(0);
        };
        if profile.len() != resolution {
            warn!(
                "dropped a {}-position profile, layout has {resolution}",
                profile.len()
            );
            self.smoother.reset();
            return Ok(0);
        }

        let started = *self.started.get_or_insert(now);
        let elapsed = now.checked_duration_since(started).unwrap_or(Duration::from_ticks(0));
        let effect = EffectParams::from_elapsed_ms(elapsed.as_millis());

        let records = self.renderer.render(profile, base, effect);

        let mut written = 0;
        for (position, record) in records.iter().enumerate() {
            let bottom = self.transformer.transform(record.extreme_a, record.percentage_a);
            let top = self.transformer.transform(record.extreme_b, record.percentage_b);
            if self.packer.pack(self.store, position, bottom, top)? {
                written += 1;
            }
        }
        Ok(written)
    }

    /// Apply pending intents from the channel (non-blocking)
    fn process_intents(&mut self) -> Result<()> {
        let IntentEffects { config, target } = self.intent_processor.process_pending(&self.config);

        if let Some(config) = config {
            self.apply_config(config)?;
        }
        if let Some(target) = target {
            self.smoother.set_target(target);
        }
        Ok(())
    }

    /// Switch to an already validated configuration
    fn apply_config(&mut self, config: LightConfig) -> Result<()> {
        let layout = UniverseLayout::from(&config);
        if layout != *self.packer.layout() {
            let packer = UniversePacker::new(layout)?;
            packer.register(self.store)?;
            self.packer = packer;
            self.smoother.reset();
            info!(
                "layout changed to {} positions split at {}",
                layout.resolution, layout.midpoint
            );
        }
        if config.routes != self.config.routes
            || config.transmit_period_ms != self.config.transmit_period_ms
        {
            info!("routes and transmit period apply on restart");
        }

        self.smoother.set_speed(config.smoothing_speed);
        self.renderer.set_max_value(config.max_value);
        self.transformer = ColorTransformer::new(&ColorTransformerConfig::from(&config));
        self.config = config;
        Ok(())
    }
}

impl<R: Rasterizer, const INTENT_CHANNEL_SIZE: usize> Periodic
    for Pipeline<'_, R, INTENT_CHANNEL_SIZE>
{
    fn tick(&mut self, now: Instant) {
        if let Err(err) = self.render(now) {
            error!("render failed: {err}");
        }
    }
}
