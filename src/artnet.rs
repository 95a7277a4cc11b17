//! `ArtDmx` packet framing
//!
//! Layout (18 header bytes + 512 channels):
//!
//! | bytes  | field                                   |
//! |--------|-----------------------------------------|
//! | 0..8   | `"Art-Net\0"`                           |
//! | 8..10  | opcode `0x5000`, little-endian          |
//! | 10..12 | protocol version 14, big-endian         |
//! | 12     | sequence (0 = sequencing disabled)      |
//! | 13     | physical port                           |
//! | 14..16 | universe, little-endian                 |
//! | 16..18 | payload length, big-endian              |
//! | 18..   | DMX channels                            |

use crate::error::{Error, Result};
use crate::universe::{UNIVERSE_SIZE, UniverseBuffer};

pub const ARTNET_ID: [u8; 8] = *b"Art-Net\0";
pub const OP_DMX: u16 = 0x5000;
pub const PROTOCOL_VERSION: u16 = 14;
pub const HEADER_LEN: usize = 18;
pub const PACKET_LEN: usize = HEADER_LEN + UNIVERSE_SIZE;

/// Header fields of an `ArtDmx` packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtDmxHeader {
    pub sequence: u8,
    pub physical: u8,
    pub universe: u16,
    pub length: u16,
}

/// Serialize a full universe into an `ArtDmx` packet
#[allow(clippy::cast_possible_truncation)]
pub fn encode_art_dmx(
    sequence: u8,
    physical: u8,
    universe: u16,
    channels: &UniverseBuffer,
) -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    packet[0..8].copy_from_slice(&ARTNET_ID);
    packet[8..10].copy_from_slice(&OP_DMX.to_le_bytes());
    packet[10..12].copy_from_slice(&PROTOCOL_VERSION.to_be_bytes());
    packet[12] = sequence;
    packet[13] = physical;
    packet[14..16].copy_from_slice(&universe.to_le_bytes());
    packet[16..18].copy_from_slice(&(UNIVERSE_SIZE as u16).to_be_bytes());
    packet[HEADER_LEN..].copy_from_slice(channels);
    packet
}

impl ArtDmxHeader {
    /// Parse and check the header of an `ArtDmx` packet
    pub fn parse(packet: &[u8]) -> Result<Self> {
        if packet.len() < HEADER_LEN {
            return Err(Error::InvalidInput("packet shorter than ArtDmx header"));
        }
        if packet[0..8] != ARTNET_ID {
            return Err(Error::InvalidInput("missing Art-Net identifier"));
        }
        if u16::from_le_bytes([packet[8], packet[9]]) != OP_DMX {
            return Err(Error::InvalidInput("not an ArtDmx packet"));
        }
        let header = Self {
            sequence: packet[12],
            physical: packet[13],
            universe: u16::from_le_bytes([packet[14], packet[15]]),
            length: u16::from_be_bytes([packet[16], packet[17]]),
        };
        if packet.len() < HEADER_LEN + usize::from(header.length) {
            return Err(Error::InvalidInput("ArtDmx payload is truncated"));
        }
        Ok(header)
    }
}
