//! Tunable configuration of the pipeline
//!
//! Persisted as a flat JSON key-value record. Every key falls back to its
//! documented default when it is absent, has the wrong type or is out of range.

pub mod selector;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::net::SocketAddr;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::WhitePolicy;
use crate::error::{Error, Result};
use crate::filter::SaturationPolicy;
use crate::packer::UniverseLayout;

pub const DEFAULT_MAX_VALUE: f32 = 75_000.0;
pub const DEFAULT_START_INDEX: usize = 0;
pub const DEFAULT_INDEX_RANGE: usize = 500;
pub const DEFAULT_INPUT_MIN: f32 = 0.0;
pub const DEFAULT_INPUT_MAX: f32 = 25_000.0;
pub const DEFAULT_OUTPUT_MIN: f32 = 1_000.0;
pub const DEFAULT_OUTPUT_MAX: f32 = 75_000.0;
pub const DEFAULT_RESOLUTION: usize = 220;
pub const DEFAULT_SMOOTHING_SPEED: f32 = 0.01;
pub const DEFAULT_BRIGHTNESS_FACTOR: f32 = 1.0;
pub const DEFAULT_SATURATION_FACTOR: f32 = 1.0;
pub const DEFAULT_UNIVERSE_MIDPOINT: usize = 104;
pub const DEFAULT_TRANSMIT_PERIOD_MS: u64 = 25;
pub const DEFAULT_IMAGE_WIDTH: usize = 2200;
pub const DEFAULT_IMAGE_HEIGHT: usize = 640;

/// Standard Art-Net UDP port
pub const ARTNET_PORT: u16 = 6454;

/// Universe ids assigned to the four fixture rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseRoles {
    pub bottom_low: u16,
    pub bottom_high: u16,
    pub top_low: u16,
    pub top_high: u16,
}

impl UniverseRoles {
    pub const fn all(self) -> [u16; 4] {
        [self.bottom_low, self.bottom_high, self.top_low, self.top_high]
    }
}

impl Default for UniverseRoles {
    fn default() -> Self {
        Self {
            bottom_low: 2,
            bottom_high: 0,
            top_low: 3,
            top_high: 1,
        }
    }
}

/// Network endpoint serving one universe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRoute {
    pub universe: u16,
    /// `ip:port` of the receiving node
    pub address: String,
}

impl EndpointRoute {
    pub fn new(universe: u16, address: &str) -> Self {
        Self {
            universe,
            address: address.into(),
        }
    }

    /// Parse the configured address
    pub fn endpoint(&self) -> Result<SocketAddr> {
        self.address
            .parse()
            .map_err(|_| Error::InvalidInput("endpoint address is not ip:port"))
    }
}

fn default_routes() -> Vec<EndpointRoute> {
    vec![
        EndpointRoute::new(0, "192.168.1.200:6454"),
        EndpointRoute::new(1, "192.168.1.200:6454"),
        EndpointRoute::new(2, "192.168.1.201:6454"),
        EndpointRoute::new(3, "192.168.1.201:6454"),
    ]
}

/// Complete set of pipeline tunables
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LightConfig {
    /// Profile value that maps to the full image width
    pub max_value: f32,
    /// First sample index consumed from the sensor feed
    pub start_index: usize,
    /// Number of sample values consumed from `start_index`
    pub index_range: usize,
    pub input_min: f32,
    pub input_max: f32,
    pub output_min: f32,
    pub output_max: f32,
    /// Number of logical positions
    pub resolution: usize,
    /// Per-tick approach rate in `(0, 1]`
    pub smoothing_speed: f32,
    pub brightness_factor: f32,
    pub saturation_factor: f32,
    /// First position served by the "high" universes
    pub universe_midpoint: usize,
    pub transmit_period_ms: u64,
    pub white_policy: WhitePolicy,
    pub saturation_policy: SaturationPolicy,
    pub image_width: usize,
    pub image_height: usize,
    pub universes: UniverseRoles,
    pub routes: Vec<EndpointRoute>,
    /// Stamp packets with a per-universe sequence number instead of 0
    pub sequencing: bool,
    pub physical_port: u8,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
            start_index: DEFAULT_START_INDEX,
            index_range: DEFAULT_INDEX_RANGE,
            input_min: DEFAULT_INPUT_MIN,
            input_max: DEFAULT_INPUT_MAX,
            output_min: DEFAULT_OUTPUT_MIN,
            output_max: DEFAULT_OUTPUT_MAX,
            resolution: DEFAULT_RESOLUTION,
            smoothing_speed: DEFAULT_SMOOTHING_SPEED,
            brightness_factor: DEFAULT_BRIGHTNESS_FACTOR,
            saturation_factor: DEFAULT_SATURATION_FACTOR,
            universe_midpoint: DEFAULT_UNIVERSE_MIDPOINT,
            transmit_period_ms: DEFAULT_TRANSMIT_PERIOD_MS,
            white_policy: WhitePolicy::default(),
            saturation_policy: SaturationPolicy::default(),
            image_width: DEFAULT_IMAGE_WIDTH,
            image_height: DEFAULT_IMAGE_HEIGHT,
            universes: UniverseRoles::default(),
            routes: default_routes(),
            sequencing: false,
            physical_port: 0,
        }
    }
}

impl LightConfig {
    /// Load a persisted record, falling back to defaults key by key
    pub fn from_json(data: &[u8]) -> Self {
        match serde_json::from_slice::<Map<String, Value>>(data) {
            Ok(record) => Self::from_record(&record),
            Err(err) => {
                warn!("config record is unreadable ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Build a config from an already parsed key-value record
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let d = Self::default();
        let finite = |v: &f32| v.is_finite();
        let non_negative = |v: &f32| v.is_finite() && *v >= 0.0;

        Self {
            max_value: field(record, "maxValue", d.max_value, |v: &f32| {
                v.is_finite() && *v > 0.0
            }),
            start_index: field(record, "startIndex", d.start_index, |_| true),
            index_range: field(record, "indexRange", d.index_range, |v| *v >= 2),
            input_min: field(record, "inputMin", d.input_min, finite),
            input_max: field(record, "inputMax", d.input_max, finite),
            output_min: field(record, "outputMin", d.output_min, finite),
            output_max: field(record, "outputMax", d.output_max, finite),
            resolution: field(record, "resolution", d.resolution, |v| *v >= 2),
            smoothing_speed: round_speed(field(
                record,
                "smoothingSpeed",
                d.smoothing_speed,
                |v: &f32| *v > 0.0 && *v <= 1.0,
            )),
            brightness_factor: field(record, "brightnessFactor", d.brightness_factor, non_negative),
            saturation_factor: field(record, "saturationFactor", d.saturation_factor, non_negative),
            universe_midpoint: field(record, "universeMidpoint", d.universe_midpoint, |_| true),
            transmit_period_ms: field(record, "transmitPeriodMs", d.transmit_period_ms, |v| {
                *v > 0
            }),
            white_policy: field(record, "whitePolicy", d.white_policy, |_| true),
            saturation_policy: field(record, "saturationPolicy", d.saturation_policy, |_| true),
            image_width: field(record, "imageWidth", d.image_width, |v| *v > 0),
            image_height: field(record, "imageHeight", d.image_height, |v| *v > 0),
            universes: field(record, "universes", d.universes, |_| true),
            routes: field(record, "routes", d.routes, |routes: &Vec<EndpointRoute>| {
                routes.iter().all(|route| route.endpoint().is_ok())
            }),
            sequencing: field(record, "sequencing", d.sequencing, |_| true),
            physical_port: field(record, "physicalPort", d.physical_port, |_| true),
        }
    }

    /// Serialize into the flat record accepted by [`LightConfig::from_json`]
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|_| Error::InvalidInput("config is not serializable"))
    }

    /// Check the relations between keys that single-key fallbacks cannot repair
    #[allow(clippy::float_cmp)]
    pub fn validate(&self) -> Result<()> {
        if self.resolution < 2 {
            return Err(Error::InvalidInput("resolution must be at least 2"));
        }
        if self.input_max == self.input_min {
            return Err(Error::InvalidInput("inputMin and inputMax must differ"));
        }
        if self.image_height < self.resolution {
            return Err(Error::InvalidInput("image is shorter than the resolution"));
        }
        UniverseLayout::from(self).check()
    }

    /// Endpoint configured for `universe`
    pub fn route_for(&self, universe: u16) -> Option<&EndpointRoute> {
        self.routes.iter().find(|route| route.universe == universe)
    }
}

/// Round a smoothing speed to three decimals
pub fn round_speed(speed: f32) -> f32 {
    libm::roundf(speed * 1000.0) / 1000.0
}

fn field<T: DeserializeOwned>(
    record: &Map<String, Value>,
    key: &str,
    fallback: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    let Some(value) = record.get(key) else {
        return fallback;
    };
    match T::deserialize(value) {
        Ok(parsed) if valid(&parsed) => parsed,
        _ => {
            warn!("config key `{key}` is malformed, using default");
            fallback
        }
    }
}
