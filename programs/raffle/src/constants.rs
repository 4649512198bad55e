/// PDA seed of a raffle account, followed by the creator's key.
pub const RAFFLE_SEED: &[u8] = b"raffle";

/// PDA seed of a VRF coordinator account, followed by the oracle authority's key.
pub const COORDINATOR_SEED: &[u8] = b"coordinator";

/// PDA seed of a subscription account, followed by the coordinator key and the
/// little-endian subscription id.
pub const SUBSCRIPTION_SEED: &[u8] = b"subscription";

/// Maximum number of entries a single round can hold.
pub const MAX_PLAYERS: usize = 100;

/// Maximum number of consumers registered on one subscription.
pub const MAX_CONSUMERS: usize = 8;

/// Maximum number of outstanding randomness requests per coordinator.
pub const MAX_PENDING_REQUESTS: usize = 16;

/// Upper bound on the random words a single request may ask for.
pub const MAX_NUM_WORDS: u32 = 4;

// Default tuning used by deployments that don't override it.
pub const DEFAULT_INTERVAL: i64 = 30;
pub const DEFAULT_CALLBACK_GAS_LIMIT: u32 = 500_000;
pub const DEFAULT_REQUEST_CONFIRMATIONS: u16 = 3;
pub const DEFAULT_NUM_WORDS: u32 = 1;

/// Reason bits reported by `check_upkeep`.
pub const UPKEEP_NOT_OPEN: u8 = 1 << 0;
pub const UPKEEP_INTERVAL_NOT_ELAPSED: u8 = 1 << 1;
pub const UPKEEP_NO_PLAYERS: u8 = 1 << 2;
pub const UPKEEP_NO_BALANCE: u8 = 1 << 3;
