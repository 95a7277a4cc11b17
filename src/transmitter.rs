//! Art-Net transmitter
//!
//! Sends one universe per tick, cycling through the configured routes. Sends
//! are fire-and-forget: a failed datagram is logged and the next tick moves on.

use alloc::vec::Vec;
use core::net::SocketAddr;

use embassy_time::Instant;
use log::{trace, warn};

use crate::artnet::encode_art_dmx;
use crate::config::LightConfig;
use crate::error::{Error, Result};
use crate::universe::{MAX_UNIVERSES, UniverseStore};
use crate::{PacketSink, Periodic};

/// Destination of one universe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub universe: u16,
    pub endpoint: SocketAddr,
}

/// Transmitter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitState {
    Idle,
    Sending { universe: u16 },
}

/// Round-robin `ArtDmx` sender reading the shared universe buffers
pub struct Transmitter<'a, S: PacketSink> {
    sink: S,
    store: &'a UniverseStore,
    routes: heapless::Vec<Route, MAX_UNIVERSES>,
    sequences: [u8; MAX_UNIVERSES],
    cursor: usize,
    state: TransmitState,
    physical_port: u8,
    sequencing: bool,
}

impl<'a, S: PacketSink> Transmitter<'a, S> {
    /// Create a transmitter for `routes`, sent in the given order
    pub fn new(sink: S, store: &'a UniverseStore, routes: &[Route]) -> Result<Self> {
        if routes.is_empty() {
            return Err(Error::InvalidInput("no routes configured"));
        }
        let routes = heapless::Vec::from_slice(routes)
            .map_err(|()| Error::InvalidInput("too many routes"))?;
        Ok(Self {
            sink,
            store,
            routes,
            sequences: [0; MAX_UNIVERSES],
            cursor: 0,
            state: TransmitState::Idle,
            physical_port: 0,
            sequencing: false,
        })
    }

    /// Create a transmitter from the configured routes and packet options
    pub fn from_config(sink: S, store: &'a UniverseStore, config: &LightConfig) -> Result<Self> {
        let routes = config
            .routes
            .iter()
            .map(|route| {
                Ok(Route {
                    universe: route.universe,
                    endpoint: route.endpoint()?,
                })
            })
            .collect::<Result<Vec<Route>>>()?;
        let mut transmitter = Self::new(sink, store, &routes)?;
        transmitter.physical_port = config.physical_port;
        transmitter.sequencing = config.sequencing;
        Ok(transmitter)
    }

    #[must_use]
    pub fn with_sequencing(mut self, sequencing: bool) -> Self {
        self.sequencing = sequencing;
        self
    }

    pub const fn state(&self) -> TransmitState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Universe the next tick will send
    pub fn next_universe(&self) -> u16 {
        self.routes[self.cursor].universe
    }

    /// Send the next universe in the rotation and return its id
    pub fn send_next(&mut self) -> Result<u16> {
        let index = self.cursor;
        let route = self.routes[index];
        self.cursor = (self.cursor + 1) % self.routes.len();

        let Some(channels) = self.store.snapshot(route.universe) else {
            return Err(Error::InvalidInput("universe is not registered"));
        };

        self.state = TransmitState::Sending {
            universe: route.universe,
        };
        let sequence = self.next_sequence(index);
        let packet = encode_art_dmx(sequence, self.physical_port, route.universe, &channels);
        let sent = self.sink.send(route.endpoint, &packet);
        self.state = TransmitState::Idle;

        match sent {
            Ok(()) => {
                trace!("universe {} sent to {}", route.universe, route.endpoint);
                Ok(route.universe)
            }
            Err(err) => {
                warn!(
                    "universe {} to {} failed: {err:?}",
                    route.universe, route.endpoint
                );
                Err(Error::Transport {
                    universe: route.universe,
                })
            }
        }
    }

    /// Sequence byte for the route at `index`; 0 while sequencing is off
    fn next_sequence(&mut self, index: usize) -> u8 {
        if !self.sequencing {
            return 0;
        }
        let sequence = &mut self.sequences[index];
        *sequence = if *sequence == u8::MAX { 1 } else { *sequence + 1 };
        *sequence
    }
}

impl<S: PacketSink> Periodic for Transmitter<'_, S> {
    fn tick(&mut self, _now: Instant) {
        match self.send_next() {
            Ok(_) | Err(Error::Transport { .. }) => {}
            Err(err) => warn!("{err}"),
        }
    }
}
