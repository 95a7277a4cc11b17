#![no_std]

extern crate alloc;

pub mod artnet;
pub mod channel;
pub mod color;
pub mod config;
pub mod error;
pub mod filter;
pub mod frame;
pub mod frame_scheduler;
pub mod intent_processor;
pub mod packer;
pub mod pipeline;
pub mod rasterizer;
pub mod renderer;
pub mod signal;
pub mod smoother;
pub mod transmitter;
pub mod universe;

pub use artnet::{ArtDmxHeader, PACKET_LEN, encode_art_dmx};
pub use config::LightConfig;
pub use config::selector::{Parameter, ParameterSelector};
pub use error::{Error, Result};
pub use filter::{ColorTransformer, ColorTransformerConfig};
pub use frame::{BaseImage, Frame};
pub use frame_scheduler::FrameScheduler;
pub use intent_processor::{
    IntentChannel, IntentEffects, IntentProcessor, IntentReceiver, IntentSender, PipelineIntent,
};
pub use packer::{UniverseLayout, UniversePacker};
pub use pipeline::Pipeline;
pub use rasterizer::{CpuCompositor, EffectParams, Rasterizer};
pub use renderer::{ColumnRecord, ProfileRenderer};
pub use signal::{IntensitySample, resample};
pub use smoother::ProfileSmoother;
pub use transmitter::{Route, Transmitter};
pub use universe::{UniverseFrame, UniverseStore};

pub use color::{Hsv, Rgb, Rgbw};
pub use embassy_time::{Duration, Instant};

/// Abstract datagram output
///
/// Implement this trait to put Art-Net packets on a network stack.
/// The transmitter is generic over this trait.
pub trait PacketSink {
    type Error: core::fmt::Debug;

    /// Send one datagram to `endpoint`
    fn send(&mut self, endpoint: core::net::SocketAddr, packet: &[u8]) -> Result<(), Self::Error>;
}

/// Work driven at a fixed period by [`FrameScheduler`]
pub trait Periodic {
    fn tick(&mut self, now: Instant);
}
