//! Thread-safe front door to the instruction handlers.
//!
//! Each operation stages its writes in a [`WriteBatch`] and commits them in one
//! step, so a failed operation leaves nothing behind. Every mutating
//! operation holds the vault lock from its first read to its commit, which
//! serializes writers of the shared [`VaultState`] and of any one
//! [`StakeInfo`] alike.

use std::sync::{Mutex, MutexGuard, PoisonError};

use solana_program::{msg, pubkey::Pubkey};

use crate::clock::SlotClock;
use crate::config::VaultConfig;
use crate::error::StakeVaultError;
use crate::instructions::{
    self, ClaimRewardsAccounts, FundRewardsAccounts, InitializeVaultAccounts, StakeAccounts,
    UnstakeAccounts,
};
use crate::pda::{self, VaultAddresses};
use crate::state::{StakeInfo, VaultState};
use crate::store::{AccountStore, WriteBatch};
use crate::token;

pub struct StakeVault<S, C> {
    config: VaultConfig,
    addresses: VaultAddresses,
    store: S,
    clock: C,
    vault_lock: Mutex<()>,
}

fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    // the guarded value is (), so a poisoned lock carries no broken state
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: AccountStore, C: SlotClock> StakeVault<S, C> {
    pub fn new(config: VaultConfig, store: S, clock: C) -> Self {
        let addresses = VaultAddresses::resolve(&config.program_id, &config.mint);
        Self {
            config,
            addresses,
            store,
            clock,
            vault_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn addresses(&self) -> &VaultAddresses {
        &self.addresses
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn stake_info_address(&self, user: &Pubkey) -> (Pubkey, u8) {
        pda::find_stake_info_address(&self.config.program_id, user, &self.config.mint)
    }

    /// Creates the vault for the configured mint. `authority` must be the mint authority.
    pub fn initialize(&self, authority: &Pubkey) -> Result<VaultState, StakeVaultError> {
        let accounts = InitializeVaultAccounts {
            authority: *authority,
            vault: self.addresses.vault,
            vault_bump: self.addresses.vault_bump,
            custody: self.addresses.custody,
            reward_vault: self.addresses.reward_vault,
            mint: self.config.mint,
        };

        let _vault_guard = acquire(&self.vault_lock);
        let mut batch = WriteBatch::new(&self.store);
        let state = instructions::initialize_vault(
            &mut batch,
            &accounts,
            self.config.reward_rate,
            self.clock.slot(),
        )?;
        batch.commit()?;
        Ok(state)
    }

    pub fn stake(&self, user: &Pubkey, amount: u64) -> Result<StakeInfo, StakeVaultError> {
        let (stake_info, stake_info_bump) = self.stake_info_address(user);
        let accounts = StakeAccounts {
            user: *user,
            user_token: pda::user_token_address(user, &self.config.mint),
            vault: self.addresses.vault,
            custody: self.addresses.custody,
            stake_info,
            stake_info_bump,
        };

        let _vault_guard = acquire(&self.vault_lock);
        let mut batch = WriteBatch::new(&self.store);
        let info = instructions::stake(&mut batch, &accounts, amount, self.clock.slot())?;
        batch.commit()?;
        Ok(info)
    }

    pub fn unstake(&self, user: &Pubkey, amount: u64) -> Result<StakeInfo, StakeVaultError> {
        let accounts = UnstakeAccounts {
            user: *user,
            user_token: pda::user_token_address(user, &self.config.mint),
            vault: self.addresses.vault,
            custody: self.addresses.custody,
            stake_info: self.stake_info_address(user).0,
        };

        let _vault_guard = acquire(&self.vault_lock);
        let mut batch = WriteBatch::new(&self.store);
        let info = instructions::unstake(&mut batch, &accounts, amount, self.clock.slot())?;
        batch.commit()?;
        Ok(info)
    }

    /// Moves `amount` from the authority's token account into the reward pool.
    pub fn fund_rewards(&self, authority: &Pubkey, amount: u64) -> Result<u64, StakeVaultError> {
        let accounts = FundRewardsAccounts {
            authority: *authority,
            authority_token: pda::user_token_address(authority, &self.config.mint),
            vault: self.addresses.vault,
            reward_vault: self.addresses.reward_vault,
        };

        let _vault_guard = acquire(&self.vault_lock);
        let mut batch = WriteBatch::new(&self.store);
        let balance = instructions::fund_rewards(&mut batch, &accounts, amount)?;
        batch.commit()?;
        Ok(balance)
    }

    pub fn claim_rewards(&self, user: &Pubkey) -> Result<u64, StakeVaultError> {
        let accounts = ClaimRewardsAccounts {
            user: *user,
            user_token: pda::user_token_address(user, &self.config.mint),
            vault: self.addresses.vault,
            reward_vault: self.addresses.reward_vault,
            stake_info: self.stake_info_address(user).0,
        };

        let _vault_guard = acquire(&self.vault_lock);
        let mut batch = WriteBatch::new(&self.store);
        let claimed = instructions::claim_rewards(&mut batch, &accounts, self.clock.slot())?;
        batch.commit()?;
        msg!("Claimed {} reward tokens", claimed);
        Ok(claimed)
    }

    pub fn get_stake_info(&self, user: &Pubkey) -> Result<Option<StakeInfo>, StakeVaultError> {
        let (key, _) = self.stake_info_address(user);
        self.store
            .read(&key)?
            .map(|data| StakeInfo::unpack(&data))
            .transpose()
    }

    pub fn vault_state(&self) -> Result<Option<VaultState>, StakeVaultError> {
        self.store
            .read(&self.addresses.vault)?
            .map(|data| VaultState::unpack(&data))
            .transpose()
    }

    /// Balance of `owner`'s token account for the vault mint.
    pub fn token_balance(&self, owner: &Pubkey) -> Result<u64, StakeVaultError> {
        let key = pda::user_token_address(owner, &self.config.mint);
        let batch = WriteBatch::new(&self.store);
        Ok(token::load_token_account(&batch, &key)?.amount)
    }

    pub fn custody_balance(&self) -> Result<u64, StakeVaultError> {
        let batch = WriteBatch::new(&self.store);
        Ok(token::load_token_account(&batch, &self.addresses.custody)?.amount)
    }

    pub fn reward_pool_balance(&self) -> Result<u64, StakeVaultError> {
        let batch = WriteBatch::new(&self.store);
        Ok(token::load_token_account(&batch, &self.addresses.reward_vault)?.amount)
    }
}
