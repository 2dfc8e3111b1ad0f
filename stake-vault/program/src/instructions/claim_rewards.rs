use crate::error::StakeVaultError;
use crate::instructions::shared::{load_user_stake, load_vault, store_stake_info, store_vault};
use crate::store::{AccountStore, WriteBatch};
use crate::token;

use solana_program::{msg, pubkey::Pubkey};

/// Accounts:
/// [signer user]
/// [writable user_token]
/// [writable vault]
/// [writable reward_vault]
/// [writable stake_info]
pub struct ClaimRewardsAccounts {
    pub user: Pubkey,
    pub user_token: Pubkey,
    pub vault: Pubkey,
    pub reward_vault: Pubkey,
    pub stake_info: Pubkey,
}

/// Pays out everything accrued so far and returns the amount paid.
pub fn claim_rewards<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    accounts: &ClaimRewardsAccounts,
    slot: u64,
) -> Result<u64, StakeVaultError> {
    let mut info = load_user_stake(batch, &accounts.stake_info, &accounts.user)?;
    let mut vault = load_vault(batch, &accounts.vault)?;
    let mint = token::load_mint(batch, &vault.mint)?;
    info.accrue(slot, vault.reward_rate, mint.decimals)?;

    let owed = info.pending_rewards;
    if owed == 0 {
        return Err(StakeVaultError::NoRewards);
    }
    let pool = token::load_token_account(batch, &accounts.reward_vault)?;
    if pool.amount < owed {
        msg!("Reward pool holds {} but {} is owed", pool.amount, owed);
        return Err(StakeVaultError::InsufficientRewards);
    }

    msg!("Transferring {} reward tokens to user", owed);
    token::transfer(
        batch,
        &accounts.reward_vault,
        &accounts.user_token,
        &accounts.vault,
        owed,
    )?;

    info.pending_rewards = 0;
    info.total_rewards_claimed = info
        .total_rewards_claimed
        .checked_add(owed)
        .ok_or(StakeVaultError::Overflow)?;
    vault.total_rewards_paid = vault
        .total_rewards_paid
        .checked_add(owed)
        .ok_or(StakeVaultError::Overflow)?;

    store_stake_info(batch, accounts.stake_info, &info)?;
    store_vault(batch, accounts.vault, &vault)?;
    Ok(owed)
}
