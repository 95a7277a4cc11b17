//! Sensor-to-fixture bridge
//!
//! Reads intensity samples from stdin, renders them on the CPU compositor and
//! streams the fixture universes to Art-Net nodes over UDP. The render loop
//! runs on the main thread, the transmit loop and the sensor feed on their own
//! threads. All of them share one universe store and one intent channel.

mod base_image;
mod sensor;
mod udp;

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, bail};
use clap::Parser;
use log::{error, info, warn};
use myrtio_stage_light::{
    CpuCompositor, Duration, Error, FrameScheduler, Instant, IntentChannel, LightConfig, Periodic,
    Pipeline, Transmitter, UniverseStore,
};

use crate::base_image::load_base_image;
use crate::sensor::SensorFeed;
use crate::udp::UdpSink;

/// Intent channel size
const INTENT_CHANNEL_SIZE: usize = 16;

/// Samples and config updates for the render loop
static INTENTS: IntentChannel<INTENT_CHANNEL_SIZE> = IntentChannel::<INTENT_CHANNEL_SIZE>::new();

/// Universe buffers shared by the render and transmit loops
static UNIVERSES: UniverseStore = UniverseStore::new();

#[derive(Debug, Parser)]
#[command(version, about = "Drive RGBW fixtures over Art-Net from an intensity feed")]
struct Args {
    /// JSON config record; missing keys use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// PNG base image, scaled to the configured size
    #[arg(long)]
    image: Option<PathBuf>,

    /// Render rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Local address of the Art-Net socket
    #[arg(long, default_value = "0.0.0.0:0")]
    bind: String,
}

/// Render loop task that stops on layout failures
struct RenderLoop {
    pipeline: Pipeline<'static, CpuCompositor, INTENT_CHANNEL_SIZE>,
    failure: Option<Error>,
}

impl Periodic for RenderLoop {
    fn tick(&mut self, now: Instant) {
        match self.pipeline.render(now) {
            Ok(_) => {}
            Err(err @ Error::AddressOutOfRange { .. }) => self.failure = Some(err),
            Err(err) => warn!("{err}"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    if args.fps == 0 {
        bail!("--fps must be positive");
    }

    let base = load_base_image(args.image.as_deref(), &config)?;
    let pipeline = Pipeline::new(
        INTENTS.receiver(),
        &UNIVERSES,
        CpuCompositor::new(),
        config.clone(),
    )?
    .with_base_image(base);

    let sink = UdpSink::bind(&args.bind).context("cannot bind the art-net socket")?;
    let transmitter = Transmitter::from_config(sink, &UNIVERSES, &config)?;
    let transmit_period = Duration::from_millis(config.transmit_period_ms);
    thread::Builder::new()
        .name("transmit".into())
        .spawn(move || run(FrameScheduler::new(transmitter, transmit_period)))?;

    let feed = SensorFeed::new(INTENTS.sender(), config, args.config.clone());
    thread::Builder::new().name("sensor".into()).spawn(move || {
        if let Err(err) = feed.run() {
            error!("sensor feed failed: {err}");
        }
    })?;

    let frame_duration = Duration::from_micros(1_000_000 / u64::from(args.fps));
    let mut scheduler = FrameScheduler::new(
        RenderLoop {
            pipeline,
            failure: None,
        },
        frame_duration,
    );
    info!("rendering at {} fps", args.fps);
    loop {
        let result = scheduler.tick(Instant::now());
        if let Some(err) = scheduler.task().failure {
            bail!("render loop stopped: {err}");
        }
        sleep(result.sleep_duration);
    }
}

/// Drive `scheduler` forever
fn run<P: Periodic>(mut scheduler: FrameScheduler<P>) {
    loop {
        let result = scheduler.tick(Instant::now());
        sleep(result.sleep_duration);
    }
}

fn sleep(duration: Duration) {
    thread::sleep(std::time::Duration::from_micros(duration.as_micros()));
}

/// Read the persisted config; a missing file means defaults
fn load_config(path: Option<&Path>) -> anyhow::Result<LightConfig> {
    let config = match path {
        Some(path) if path.exists() => {
            let record = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
            LightConfig::from_json(&record)
        }
        Some(path) => {
            info!("{} does not exist yet, using defaults", path.display());
            LightConfig::default()
        }
        None => LightConfig::default(),
    };
    config.validate().context("config does not fit the universe layout")?;
    Ok(config)
}
