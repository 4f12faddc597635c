/// Identifier of a protocol version.
///
/// Fork ids are totally ordered by numeric value. [`ForkId::WILDCARD`] is a
/// distinguished value used by the processor registry to match any fork for
/// which no more specific processor is registered.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForkId(pub u64);

impl ForkId {
    /// The wildcard fork id, matching any fork.
    pub const WILDCARD: Self = Self(u64::MAX);

    /// Returns true if this is the wildcard fork id.
    pub const fn is_wildcard(&self) -> bool {
        self.0 == u64::MAX
    }
}

impl std::fmt::Display for ForkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wildcard() {
            write!(f, "*")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<u64> for ForkId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The batch-number range over which a fork id is active.
///
/// Intervals are appended in increasing fork id order and never overlap. The
/// last interval of the table is unbounded (`to_batch_number == u64::MAX`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkIdInterval {
    /// The first batch number of the interval.
    pub from_batch_number: u64,
    /// The last batch number of the interval.
    pub to_batch_number: u64,
    /// The fork id active over the interval.
    pub fork_id: ForkId,
    /// The wire-format version string announced with the fork.
    pub version: String,
    /// The L1 block number at which the fork was announced.
    pub block_number: u64,
}

impl ForkIdInterval {
    /// Returns true if the given batch number falls inside the interval.
    pub const fn contains(&self, batch_number: u64) -> bool {
        self.from_batch_number <= batch_number && batch_number <= self.to_batch_number
    }
}
