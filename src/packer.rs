//! Universe packer - maps logical positions to fixture records
//!
//! Positions below the midpoint go to the "low" universes, the rest to the
//! "high" universes. Bottom fixtures run in position order, top fixtures run
//! backwards so both rows start at the same physical end.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::Rgbw;
use crate::config::{LightConfig, UniverseRoles};
use crate::error::{Error, Result};
use crate::universe::{FIXTURE_CHANNELS, UNIVERSE_SIZE, UniverseStore};

/// Channel address of one fixture record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureAddress {
    pub universe: u16,
    /// First channel of the record
    pub offset: usize,
}

/// Position-to-channel addressing scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniverseLayout {
    pub resolution: usize,
    pub midpoint: usize,
    pub roles: UniverseRoles,
}

impl From<&LightConfig> for UniverseLayout {
    fn from(config: &LightConfig) -> Self {
        Self {
            resolution: config.resolution,
            midpoint: config.universe_midpoint,
            roles: config.universes,
        }
    }
}

impl UniverseLayout {
    /// Addresses of the bottom and top fixture of `position`
    pub fn addresses(&self, position: usize) -> Result<(FixtureAddress, FixtureAddress)> {
        if position >= self.resolution {
            return Err(Error::InvalidInput("position beyond resolution"));
        }
        let (bottom, top) = if position < self.midpoint {
            (
                FixtureAddress {
                    universe: self.roles.bottom_low,
                    offset: position * FIXTURE_CHANNELS,
                },
                FixtureAddress {
                    universe: self.roles.top_low,
                    offset: (self.midpoint - 1 - position) * FIXTURE_CHANNELS,
                },
            )
        } else {
            (
                FixtureAddress {
                    universe: self.roles.bottom_high,
                    offset: (position - self.midpoint) * FIXTURE_CHANNELS,
                },
                FixtureAddress {
                    universe: self.roles.top_high,
                    offset: (self.resolution - 1 - position) * FIXTURE_CHANNELS,
                },
            )
        };
        for address in [bottom, top] {
            if address.offset + FIXTURE_CHANNELS > UNIVERSE_SIZE {
                return Err(Error::AddressOutOfRange {
                    universe: address.universe,
                    offset: address.offset,
                });
            }
        }
        Ok((bottom, top))
    }

    /// Verify that every position fits its universe
    pub fn check(&self) -> Result<()> {
        if self.resolution == 0 || self.midpoint > self.resolution {
            return Err(Error::InvalidInput("midpoint beyond resolution"));
        }
        // The extreme offsets sit at both ends of each half
        let edges = [0, self.midpoint.saturating_sub(1), self.midpoint, self.resolution - 1];
        for position in edges {
            if position < self.resolution {
                self.addresses(position)?;
            }
        }
        Ok(())
    }
}

/// Writes fixture colors into the shared universe buffers
///
/// Only positions whose colors changed since the last write are touched.
#[derive(Debug, Clone)]
pub struct UniversePacker {
    layout: UniverseLayout,
    written: Vec<Option<(Rgbw, Rgbw)>>,
}

impl UniversePacker {
    pub fn new(layout: UniverseLayout) -> Result<Self> {
        layout.check()?;
        Ok(Self {
            layout,
            written: vec![None; layout.resolution],
        })
    }

    pub const fn layout(&self) -> &UniverseLayout {
        &self.layout
    }

    /// Register every universe the layout writes to
    pub fn register(&self, store: &UniverseStore) -> Result<()> {
        for universe in self.layout.roles.all() {
            store.register(universe)?;
        }
        Ok(())
    }

    /// Write the fixture pair of `position`.
    ///
    /// Returns `false` when the pair is unchanged and nothing was written.
    pub fn pack(
        &mut self,
        store: &UniverseStore,
        position: usize,
        bottom: Rgbw,
        top: Rgbw,
    ) -> Result<bool> {
        if self.written.get(position) == Some(&Some((bottom, top))) {
            return Ok(false);
        }
        let (bottom_address, top_address) = self.layout.addresses(position)?;
        store.write_fixture(
            bottom_address.universe,
            bottom_address.offset,
            bottom.to_channels(),
        )?;
        store.write_fixture(top_address.universe, top_address.offset, top.to_channels())?;
        self.written[position] = Some((bottom, top));
        Ok(true)
    }

    /// Forget what was written; the next pack rewrites every position
    pub fn invalidate(&mut self) {
        self.written.fill(None);
    }
}
