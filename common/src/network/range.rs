use std::fmt;
use std::ops::RangeInclusive;

use crate::error::ConfigError;

pub const DEFAULT_START_PORT: u32 = 1;
pub const DEFAULT_END_PORT: u32 = 1024;

/// An inclusive, ascending range of TCP ports with `1 <= start <= end <= 65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Validates raw user input. Bounds are taken as `u32` so that values just
    /// outside the port space (`0`, `65536`) are reported as a range error
    /// rather than a parse error.
    pub fn new(start: u32, end: u32) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRange { start, end };

        if start < 1 || start > end {
            return Err(invalid());
        }
        let start: u16 = u16::try_from(start).map_err(|_| invalid())?;
        let end: u16 = u16::try_from(end).map_err(|_| invalid())?;

        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of ports in the range, `end - start + 1`.
    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, port: u16) -> bool {
        (self.start..=self.end).contains(&port)
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_PORT as u16,
            end: DEFAULT_END_PORT as u16,
        }
    }
}

impl IntoIterator for PortRange {
    type Item = u16;
    type IntoIter = RangeInclusive<u16>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
