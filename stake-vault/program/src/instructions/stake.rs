use crate::error::StakeVaultError;
use crate::instructions::shared::{load_stake_info, load_vault, store_stake_info, store_vault};
use crate::state::StakeInfo;
use crate::store::{AccountStore, WriteBatch};
use crate::token;

use solana_program::{msg, pubkey::Pubkey};

/// Accounts:
/// [signer user]
/// [writable user_token]  user's ATA for the mint
/// [writable vault]
/// [writable custody]
/// [writable stake_info]  PDA [b"stake_info", user, mint], created on first stake
pub struct StakeAccounts {
    pub user: Pubkey,
    pub user_token: Pubkey,
    pub vault: Pubkey,
    pub custody: Pubkey,
    pub stake_info: Pubkey,
    pub stake_info_bump: u8,
}

pub fn stake<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    accounts: &StakeAccounts,
    amount: u64,
    slot: u64,
) -> Result<StakeInfo, StakeVaultError> {
    if amount == 0 {
        msg!("No tokens to stake");
        return Err(StakeVaultError::InvalidAmount);
    }

    let mut vault = load_vault(batch, &accounts.vault)?;
    let mint = token::load_mint(batch, &vault.mint)?;

    let mut info = match load_stake_info(batch, &accounts.stake_info)? {
        Some(info) if info.user != accounts.user => {
            msg!("Stake info PDA mismatch");
            return Err(StakeVaultError::InvalidAccountData);
        }
        Some(info) => info,
        None => {
            msg!("Creating stake info account for user");
            StakeInfo::new(accounts.user, vault.mint, slot, accounts.stake_info_bump)
        }
    };
    info.accrue(slot, vault.reward_rate, mint.decimals)?;

    msg!("Transferring {} tokens to vault", amount);
    token::transfer(
        batch,
        &accounts.user_token,
        &accounts.custody,
        &accounts.user,
        amount,
    )?;

    info.staked_amount = info
        .staked_amount
        .checked_add(amount)
        .ok_or(StakeVaultError::Overflow)?;
    info.is_staked = true;
    info.stake_at_slot = slot;

    vault.total_staked = vault
        .total_staked
        .checked_add(amount)
        .ok_or(StakeVaultError::Overflow)?;

    store_stake_info(batch, accounts.stake_info, &info)?;
    store_vault(batch, accounts.vault, &vault)?;

    msg!("Stake successful!");
    Ok(info)
}
