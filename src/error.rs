//! Pipeline error taxonomy.

use core::fmt;

/// Errors produced by the lighting pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed or undersized sample, profile or payload.
    ///
    /// The offending input is dropped and the previous state stays in effect.
    InvalidInput(&'static str),
    /// A profile value normalized to zero, a negative number or NaN.
    DegenerateProfile {
        /// Profile index of the skipped row band
        index: usize,
    },
    /// A packer write would land outside the 512-channel universe.
    ///
    /// Indicates a resolution/midpoint mismatch and must be treated as fatal.
    AddressOutOfRange {
        /// Target universe
        universe: u16,
        /// First channel of the offending fixture record
        offset: usize,
    },
    /// A datagram could not be handed to the network.
    Transport {
        /// Universe whose packet was lost
        universe: u16,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
            Self::DegenerateProfile { index } => {
                write!(f, "profile value at index {index} is not positive")
            }
            Self::AddressOutOfRange { universe, offset } => write!(
                f,
                "fixture at channel {offset} does not fit universe {universe}"
            ),
            Self::Transport { universe } => {
                write!(f, "failed to send packet for universe {universe}")
            }
        }
    }
}

impl core::error::Error for Error {}

pub type Result<T, E = Error> = core::result::Result<T, E>;
