use crate::error::StakeVaultError;
use crate::instructions::shared::{load_user_stake, load_vault, store_stake_info, store_vault};
use crate::state::StakeInfo;
use crate::store::{AccountStore, WriteBatch};
use crate::token;

use solana_program::{msg, pubkey::Pubkey};

/// Accounts:
/// [signer user]
/// [writable user_token]
/// [writable vault]     signs for custody
/// [writable custody]
/// [writable stake_info]
pub struct UnstakeAccounts {
    pub user: Pubkey,
    pub user_token: Pubkey,
    pub vault: Pubkey,
    pub custody: Pubkey,
    pub stake_info: Pubkey,
}

pub fn unstake<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    accounts: &UnstakeAccounts,
    amount: u64,
    slot: u64,
) -> Result<StakeInfo, StakeVaultError> {
    let mut info = load_user_stake(batch, &accounts.stake_info, &accounts.user)?;

    if amount == 0 {
        msg!("No tokens to unstake");
        return Err(StakeVaultError::InvalidAmount);
    }
    if amount > info.staked_amount {
        msg!(
            "Unstake of {} exceeds staked amount {}",
            amount,
            info.staked_amount
        );
        return Err(StakeVaultError::InsufficientStake);
    }

    let mut vault = load_vault(batch, &accounts.vault)?;
    let mint = token::load_mint(batch, &vault.mint)?;
    info.accrue(slot, vault.reward_rate, mint.decimals)?;

    // The vault PDA owns custody, so it is the transfer authority
    msg!("Transferring {} tokens from vault to user", amount);
    token::transfer(
        batch,
        &accounts.custody,
        &accounts.user_token,
        &accounts.vault,
        amount,
    )?;

    info.staked_amount -= amount;
    info.is_staked = info.staked_amount > 0;
    info.stake_at_slot = slot;

    vault.total_staked = vault
        .total_staked
        .checked_sub(amount)
        .ok_or(StakeVaultError::Overflow)?;

    store_stake_info(batch, accounts.stake_info, &info)?;
    store_vault(batch, accounts.vault, &vault)?;

    msg!("Unstake successful!");
    Ok(info)
}
