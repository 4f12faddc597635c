/// Configuration for the synchronizer.
#[derive(Debug, Default, Clone)]
pub struct SynchronizerConfig {
    /// Whether this node is the trusted sequencer of the network. A trusted sequencer never
    /// rewinds its own state: divergence from L1 escalates to a halt instead.
    is_trusted_sequencer: bool,
    /// The sampling modulus of the consistency auditor. Zero checks every L2 block, `n > 0`
    /// checks block numbers that are multiples of `n`.
    audit_block_modulus: u64,
}

impl SynchronizerConfig {
    /// Creates a new synchronizer configuration.
    pub const fn new(is_trusted_sequencer: bool, audit_block_modulus: u64) -> Self {
        Self { is_trusted_sequencer, audit_block_modulus }
    }

    /// Returns whether this node is the trusted sequencer.
    pub const fn is_trusted_sequencer(&self) -> bool {
        self.is_trusted_sequencer
    }

    /// Returns the sampling modulus of the consistency auditor.
    pub const fn audit_block_modulus(&self) -> u64 {
        self.audit_block_modulus
    }
}
