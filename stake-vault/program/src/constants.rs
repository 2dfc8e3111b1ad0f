// Seed for the VaultState PDA
pub const VAULT_SEED: &[u8] = b"vault";
// Seed for the custody token account holding staked tokens
pub const TOKEN_SEED: &[u8] = b"token";
// Seed for the per-user StakeInfo PDA
pub const STAKE_INFO_SEED: &[u8] = b"stake_info";
// Seed for the reward pool token account
pub const REWARD_SEED: &[u8] = b"reward";

/// Rewards are disabled unless a rate is configured.
pub const DEFAULT_REWARD_RATE: u64 = 0;
