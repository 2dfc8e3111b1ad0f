use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::error::StakeVaultError;

/// Leading byte of every record this program owns.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountType {
    Uninitialized,
    Vault,
    StakeInfo,
}

/// One per mint. Custody of staked tokens and the reward pool both live in
/// token accounts owned by the vault address.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VaultState {
    pub account_type: AccountType,
    pub authority: Pubkey,
    pub mint: Pubkey,
    pub custody: Pubkey,
    pub reward_vault: Pubkey,
    /// Sum of every StakeInfo.staked_amount for this mint.
    pub total_staked: u64,
    pub reward_rate: u64,
    pub total_rewards_paid: u64,
    pub created_at_slot: u64,
    pub bump: u8,
}

impl VaultState {
    // account_type + 4 pubkeys + 4 u64 + bump
    pub const LEN: usize = 1 + 32 * 4 + 8 * 4 + 1;

    pub fn unpack(data: &[u8]) -> Result<Self, StakeVaultError> {
        let state =
            Self::try_from_slice(data).map_err(|_| StakeVaultError::InvalidAccountData)?;
        if state.account_type != AccountType::Vault {
            return Err(StakeVaultError::InvalidAccountData);
        }
        Ok(state)
    }

    pub fn pack(&self) -> Result<Vec<u8>, StakeVaultError> {
        borsh::to_vec(self).map_err(|_| StakeVaultError::InvalidAccountData)
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct StakeInfo {
    pub account_type: AccountType,
    pub user: Pubkey,
    pub mint: Pubkey,
    pub staked_amount: u64,
    /// Always equal to `staked_amount > 0`.
    pub is_staked: bool,
    /// Slot of the last stake or unstake.
    pub stake_at_slot: u64,
    /// Slot up to which rewards have been accrued into `pending_rewards`.
    pub rewards_updated_slot: u64,
    pub pending_rewards: u64,
    /// Sub-unit reward left over from the last accrual, in `10^-decimals`
    /// base units. Always below `10^decimals`.
    pub reward_carry: u128,
    pub total_rewards_claimed: u64,
    pub bump: u8,
}

impl StakeInfo {
    // account_type + user + mint + staked + is_staked + 4 u64 + carry + bump
    pub const LEN: usize = 1 + 32 * 2 + 8 + 1 + 8 * 4 + 16 + 1;

    pub fn new(user: Pubkey, mint: Pubkey, slot: u64, bump: u8) -> Self {
        Self {
            account_type: AccountType::StakeInfo,
            user,
            mint,
            staked_amount: 0,
            is_staked: false,
            stake_at_slot: slot,
            rewards_updated_slot: slot,
            pending_rewards: 0,
            reward_carry: 0,
            total_rewards_claimed: 0,
            bump,
        }
    }

    pub fn unpack(data: &[u8]) -> Result<Self, StakeVaultError> {
        let info = Self::try_from_slice(data).map_err(|_| StakeVaultError::InvalidAccountData)?;
        if info.account_type != AccountType::StakeInfo {
            return Err(StakeVaultError::InvalidAccountData);
        }
        Ok(info)
    }

    pub fn pack(&self) -> Result<Vec<u8>, StakeVaultError> {
        borsh::to_vec(self).map_err(|_| StakeVaultError::InvalidAccountData)
    }

    /// Folds rewards earned since `rewards_updated_slot` into `pending_rewards`
    /// and returns the newly earned amount.
    ///
    /// Earnings are `staked_amount * reward_rate * elapsed / 10^decimals`, i.e.
    /// `reward_rate` base units per slot for every whole token staked. The
    /// remainder of the division is kept in `reward_carry`, so settling often
    /// pays the same as settling once.
    pub fn accrue(
        &mut self,
        slot: u64,
        reward_rate: u64,
        decimals: u8,
    ) -> Result<u64, StakeVaultError> {
        let elapsed = slot.saturating_sub(self.rewards_updated_slot);
        let mut earned = 0;
        if self.staked_amount > 0 && reward_rate > 0 && elapsed > 0 {
            let scale = 10u128
                .checked_pow(u32::from(decimals))
                .ok_or(StakeVaultError::Overflow)?;
            let raw = u128::from(self.staked_amount)
                .checked_mul(u128::from(reward_rate))
                .and_then(|v| v.checked_mul(u128::from(elapsed)))
                .and_then(|v| v.checked_add(self.reward_carry))
                .ok_or(StakeVaultError::Overflow)?;
            earned = u64::try_from(raw / scale).map_err(|_| StakeVaultError::Overflow)?;
            self.pending_rewards = self
                .pending_rewards
                .checked_add(earned)
                .ok_or(StakeVaultError::Overflow)?;
            self.reward_carry = raw % scale;
        }
        self.rewards_updated_slot = self.rewards_updated_slot.max(slot);
        Ok(earned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staked(amount: u64) -> StakeInfo {
        let mut info = StakeInfo::new(Pubkey::new_unique(), Pubkey::new_unique(), 10, 255);
        info.staked_amount = amount;
        info.is_staked = amount > 0;
        info
    }

    #[test]
    fn records_encode_to_declared_len() {
        let vault = VaultState {
            account_type: AccountType::Vault,
            authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            custody: Pubkey::new_unique(),
            reward_vault: Pubkey::new_unique(),
            total_staked: 1,
            reward_rate: 2,
            total_rewards_paid: 3,
            created_at_slot: 4,
            bump: 254,
        };
        assert_eq!(vault.pack().unwrap().len(), VaultState::LEN);
        assert_eq!(staked(5).pack().unwrap().len(), StakeInfo::LEN);
    }

    #[test]
    fn unpack_rejects_other_record_kinds() {
        let data = staked(5).pack().unwrap();
        assert_eq!(
            VaultState::unpack(&data),
            Err(StakeVaultError::InvalidAccountData)
        );
        assert_eq!(StakeInfo::unpack(&data).unwrap().staked_amount, 5);
        assert_eq!(
            StakeInfo::unpack(&[0u8; 3]),
            Err(StakeVaultError::InvalidAccountData)
        );
    }

    #[test]
    fn accrue_scales_by_whole_tokens() {
        // 2.5 tokens at 6 decimals, 4 base units per token per slot, 10 slots
        let mut info = staked(2_500_000);
        let earned = info.accrue(20, 4, 6).unwrap();
        assert_eq!(earned, 100);
        assert_eq!(info.pending_rewards, 100);
        assert_eq!(info.rewards_updated_slot, 20);

        // same slot again earns nothing
        assert_eq!(info.accrue(20, 4, 6).unwrap(), 0);
        assert_eq!(info.pending_rewards, 100);
    }

    #[test]
    fn accrue_carries_fractions_between_settlements() {
        // half a token at 9 decimals earns half a base unit per slot
        let mut stepwise = staked(500_000_000);
        let mut earned = 0;
        for slot in 11..=20 {
            earned += stepwise.accrue(slot, 1, 9).unwrap();
        }
        let mut once = staked(500_000_000);
        assert_eq!(once.accrue(20, 1, 9).unwrap(), 5);

        assert_eq!(earned, 5);
        assert_eq!(stepwise.pending_rewards, once.pending_rewards);
        assert_eq!(stepwise.reward_carry, 0);

        // an odd slot count leaves half a unit behind
        assert_eq!(stepwise.accrue(21, 1, 9).unwrap(), 0);
        assert_eq!(stepwise.reward_carry, 500_000_000);
        assert_eq!(stepwise.accrue(22, 1, 9).unwrap(), 1);
        assert_eq!(stepwise.reward_carry, 0);
    }

    #[test]
    fn accrue_without_stake_only_moves_the_cursor() {
        let mut info = staked(0);
        assert_eq!(info.accrue(50, 1_000, 0).unwrap(), 0);
        assert_eq!(info.pending_rewards, 0);
        assert_eq!(info.rewards_updated_slot, 50);
    }

    #[test]
    fn accrue_reports_overflow() {
        let mut info = staked(u64::MAX);
        assert_eq!(info.accrue(u64::MAX, u64::MAX, 0), Err(StakeVaultError::Overflow));
    }
}
