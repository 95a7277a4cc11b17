//! Shared DMX universe buffers
//!
//! The render loop writes fixture records, the transmit loop copies whole
//! universes out. Both go through critical sections, so a snapshot never sees
//! half of a 4-byte fixture record.

use alloc::vec::Vec;
use core::cell::RefCell;

use critical_section::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Channels per universe
pub const UNIVERSE_SIZE: usize = 512;

/// Channels per fixture record (R, G, B, W)
pub const FIXTURE_CHANNELS: usize = 4;

/// Maximum number of universes one store can hold
pub const MAX_UNIVERSES: usize = 8;

pub type UniverseBuffer = [u8; UNIVERSE_SIZE];

type Slots = heapless::Vec<(u16, UniverseBuffer), MAX_UNIVERSES>;

/// Set of universe buffers shared between the render and transmit loops
pub struct UniverseStore {
    inner: Mutex<RefCell<Slots>>,
}

impl UniverseStore {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(heapless::Vec::new())),
        }
    }

    /// Add a zeroed buffer for `universe`; registering twice is a no-op
    pub fn register(&self, universe: u16) -> Result<()> {
        critical_section::with(|cs| {
            let mut slots = self.inner.borrow(cs).borrow_mut();
            if slots.iter().any(|(id, _)| *id == universe) {
                return Ok(());
            }
            slots
                .push((universe, [0; UNIVERSE_SIZE]))
                .map_err(|_| Error::InvalidInput("too many universes"))
        })
    }

    /// Registered universe ids in registration order
    pub fn universes(&self) -> heapless::Vec<u16, MAX_UNIVERSES> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow()
                .iter()
                .map(|(id, _)| *id)
                .collect()
        })
    }

    /// Write one fixture record starting at `offset`
    pub fn write_fixture(
        &self,
        universe: u16,
        offset: usize,
        record: [u8; FIXTURE_CHANNELS],
    ) -> Result<()> {
        if offset + FIXTURE_CHANNELS > UNIVERSE_SIZE {
            return Err(Error::AddressOutOfRange { universe, offset });
        }
        self.with_buffer(universe, |buffer| {
            buffer[offset..offset + FIXTURE_CHANNELS].copy_from_slice(&record);
        })
    }

    /// Copy out a complete universe
    pub fn snapshot(&self, universe: u16) -> Option<UniverseBuffer> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow()
                .iter()
                .find(|(id, _)| *id == universe)
                .map(|(_, buffer)| *buffer)
        })
    }

    /// Copy a frame received from a remote compute stage.
    ///
    /// Shorter payloads overwrite only their prefix.
    pub fn apply_frame(&self, frame: &UniverseFrame) -> Result<()> {
        if frame.channels.len() > UNIVERSE_SIZE {
            return Err(Error::InvalidInput("frame has more than 512 channels"));
        }
        self.with_buffer(frame.universe, |buffer| {
            buffer[..frame.channels.len()].copy_from_slice(&frame.channels);
        })
    }

    fn with_buffer(&self, universe: u16, f: impl FnOnce(&mut UniverseBuffer)) -> Result<()> {
        critical_section::with(|cs| {
            let mut slots = self.inner.borrow(cs).borrow_mut();
            let (_, buffer) = slots
                .iter_mut()
                .find(|(id, _)| *id == universe)
                .ok_or(Error::InvalidInput("universe is not registered"))?;
            f(buffer);
            Ok(())
        })
    }
}

impl Default for UniverseStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Universe contents exchanged between a compute and a transmit process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseFrame {
    pub universe: u16,
    pub channels: Vec<u8>,
}

impl UniverseFrame {
    /// Capture the current contents of `universe`
    pub fn capture(store: &UniverseStore, universe: u16) -> Option<Self> {
        store.snapshot(universe).map(|buffer| Self {
            universe,
            channels: buffer.to_vec(),
        })
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data)
            .map_err(|_| Error::InvalidInput("frame is not {\"universe\", \"channels\"}"))
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|_| Error::InvalidInput("frame is not serializable"))
    }
}
