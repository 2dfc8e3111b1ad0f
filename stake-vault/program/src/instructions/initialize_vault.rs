use crate::error::StakeVaultError;
use crate::instructions::shared::store_vault;
use crate::state::{AccountType, VaultState};
use crate::store::{AccountStore, WriteBatch};
use crate::token;

use solana_program::{msg, program_option::COption, pubkey::Pubkey};

/// Accounts:
/// [signer authority]  must be the mint authority
/// [writable vault]    PDA [b"vault", mint]
/// [writable custody]  PDA [b"token", mint], owned by vault
/// [writable reward_vault] PDA [b"reward", mint], owned by vault
/// [readonly mint]
pub struct InitializeVaultAccounts {
    pub authority: Pubkey,
    pub vault: Pubkey,
    pub vault_bump: u8,
    pub custody: Pubkey,
    pub reward_vault: Pubkey,
    pub mint: Pubkey,
}

pub fn initialize_vault<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    accounts: &InitializeVaultAccounts,
    reward_rate: u64,
    slot: u64,
) -> Result<VaultState, StakeVaultError> {
    if batch.exists(&accounts.vault)? {
        msg!("Vault already exists for this mint");
        return Err(StakeVaultError::AlreadyInitialized);
    }

    // Only the mint authority may open a vault for its token
    let mint = token::load_mint(batch, &accounts.mint)?;
    if mint.mint_authority != COption::Some(accounts.authority) {
        msg!("Unauthorized initialize attempt");
        return Err(StakeVaultError::Unauthorized);
    }

    msg!("Creating custody and reward token accounts");
    token::initialize_account(batch, accounts.custody, &accounts.mint, &accounts.vault)?;
    token::initialize_account(batch, accounts.reward_vault, &accounts.mint, &accounts.vault)?;

    let vault = VaultState {
        account_type: AccountType::Vault,
        authority: accounts.authority,
        mint: accounts.mint,
        custody: accounts.custody,
        reward_vault: accounts.reward_vault,
        total_staked: 0,
        reward_rate,
        total_rewards_paid: 0,
        created_at_slot: slot,
        bump: accounts.vault_bump,
    };
    store_vault(batch, accounts.vault, &vault)?;

    msg!("Vault initialized with authority: {}", vault.authority);
    Ok(vault)
}
