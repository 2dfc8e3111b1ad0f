use crate::error::StakeVaultError;
use crate::instructions::shared::load_vault;
use crate::store::{AccountStore, WriteBatch};
use crate::token;

use solana_program::{msg, pubkey::Pubkey};

/// Accounts:
/// [signer authority]
/// [writable authority_token]
/// [readonly vault]
/// [writable reward_vault]
pub struct FundRewardsAccounts {
    pub authority: Pubkey,
    pub authority_token: Pubkey,
    pub vault: Pubkey,
    pub reward_vault: Pubkey,
}

/// Tops up the reward pool and returns its new balance.
pub fn fund_rewards<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    accounts: &FundRewardsAccounts,
    amount: u64,
) -> Result<u64, StakeVaultError> {
    if amount == 0 {
        return Err(StakeVaultError::InvalidAmount);
    }

    let vault = load_vault(batch, &accounts.vault)?;
    if vault.authority != accounts.authority {
        msg!("Unauthorized reward funding attempt");
        return Err(StakeVaultError::Unauthorized);
    }

    msg!("Transferring {} tokens to reward pool", amount);
    token::transfer(
        batch,
        &accounts.authority_token,
        &accounts.reward_vault,
        &accounts.authority,
        amount,
    )?;

    Ok(token::load_token_account(batch, &accounts.reward_vault)?.amount)
}
