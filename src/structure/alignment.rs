// Mon Oct 19 2026 - Alex

use std::fmt;

/// Power-of-two byte alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alignment {
    value: usize,
}

impl Alignment {
    pub fn new(value: usize) -> Option<Self> {
        (value > 0 && value.is_power_of_two()).then_some(Self { value })
    }

    pub fn one() -> Self {
        Self { value: 1 }
    }

    pub fn as_usize(&self) -> usize {
        self.value
    }

    /// Smallest multiple of this alignment that is `>= offset`.
    pub fn round_up(&self, offset: usize) -> usize {
        (offset + self.value - 1) & !(self.value - 1)
    }

    pub fn is_aligned(&self, offset: usize) -> bool {
        offset & (self.value - 1) == 0
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::one()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
