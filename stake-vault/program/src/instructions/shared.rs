use solana_program::{msg, pubkey::Pubkey};

use crate::error::StakeVaultError;
use crate::state::{StakeInfo, VaultState};
use crate::store::{AccountStore, WriteBatch};

pub fn load_vault<S: AccountStore + ?Sized>(
    batch: &WriteBatch<'_, S>,
    key: &Pubkey,
) -> Result<VaultState, StakeVaultError> {
    match batch.read(key)? {
        Some(data) => VaultState::unpack(&data),
        None => {
            msg!("Vault account not initialized");
            Err(StakeVaultError::UninitializedVault)
        }
    }
}

pub fn store_vault<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    key: Pubkey,
    vault: &VaultState,
) -> Result<(), StakeVaultError> {
    batch.write(key, vault.pack()?);
    Ok(())
}

pub fn load_stake_info<S: AccountStore + ?Sized>(
    batch: &WriteBatch<'_, S>,
    key: &Pubkey,
) -> Result<Option<StakeInfo>, StakeVaultError> {
    batch
        .read(key)?
        .map(|data| StakeInfo::unpack(&data))
        .transpose()
}

pub fn store_stake_info<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    key: Pubkey,
    info: &StakeInfo,
) -> Result<(), StakeVaultError> {
    batch.write(key, info.pack()?);
    Ok(())
}

/// Loads a user's stake record and checks it belongs to them.
pub fn load_user_stake<S: AccountStore + ?Sized>(
    batch: &WriteBatch<'_, S>,
    key: &Pubkey,
    user: &Pubkey,
) -> Result<StakeInfo, StakeVaultError> {
    let info = load_stake_info(batch, key)?.ok_or_else(|| {
        msg!("No stake found for this user");
        StakeVaultError::NoStakeFound
    })?;
    if info.user != *user {
        msg!("Stake info PDA mismatch");
        return Err(StakeVaultError::InvalidAccountData);
    }
    Ok(info)
}
