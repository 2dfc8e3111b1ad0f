use solana_program::pubkey::Pubkey;

use crate::constants::DEFAULT_REWARD_RATE;

/// Settings a [`StakeVault`](crate::vault::StakeVault) is bound to for its lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultConfig {
    /// Program id every PDA is derived under.
    pub program_id: Pubkey,
    /// Mint of the token being staked.
    pub mint: Pubkey,
    /// Reward base units paid per slot for each whole staked token.
    pub reward_rate: u64,
}

impl VaultConfig {
    pub fn new(mint: Pubkey) -> Self {
        Self {
            program_id: crate::ID,
            mint,
            reward_rate: DEFAULT_REWARD_RATE,
        }
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_reward_rate(mut self, reward_rate: u64) -> Self {
        self.reward_rate = reward_rate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_declared_program_and_no_rewards() {
        let mint = Pubkey::new_unique();
        let config = VaultConfig::new(mint);
        assert_eq!(config.program_id, crate::ID);
        assert_eq!(config.mint, mint);
        assert_eq!(config.reward_rate, 0);

        let custom = Pubkey::new_unique();
        let config = config.with_program_id(custom).with_reward_rate(7);
        assert_eq!(config.program_id, custom);
        assert_eq!(config.reward_rate, 7);
    }
}
