#![allow(dead_code)]

use solana_program::pubkey::Pubkey;
use spl_stake_vault::pda::user_token_address;
use spl_stake_vault::token;
use spl_stake_vault::{
    ManualClock, MemoryStore, StakeInfo, StakeVault, VaultConfig, WriteBatch,
};

pub const DECIMALS: u8 = 9;

pub type TestVault = StakeVault<MemoryStore, ManualClock>;

pub struct Harness {
    pub vault: TestVault,
    pub mint: Pubkey,
    pub authority: Pubkey,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_reward_rate(0)
    }

    /// A minted token plus an uninitialized vault for it.
    pub fn with_reward_rate(reward_rate: u64) -> Self {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let store = MemoryStore::new();

        let mut batch = WriteBatch::new(&store);
        token::initialize_mint(&mut batch, mint, &authority, DECIMALS).unwrap();
        batch.commit().unwrap();

        let config = VaultConfig::new(mint).with_reward_rate(reward_rate);
        let vault = StakeVault::new(config, store, ManualClock::new(1));
        Self {
            vault,
            mint,
            authority,
        }
    }

    pub fn initialized() -> Self {
        let harness = Self::new();
        harness.vault.initialize(&harness.authority).unwrap();
        harness
    }

    /// Creates `owner`'s token account and mints `amount` into it.
    pub fn fund(&self, owner: &Pubkey, amount: u64) {
        let key = user_token_address(owner, &self.mint);
        let store = self.vault.store();
        let mut batch = WriteBatch::new(store);
        if !batch.exists(&key).unwrap() {
            token::initialize_account(&mut batch, key, &self.mint, owner).unwrap();
        }
        token::mint_to(&mut batch, &self.mint, &key, &self.authority, amount).unwrap();
        batch.commit().unwrap();
    }

    pub fn funded_user(&self, amount: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.fund(&user, amount);
        user
    }

    pub fn balance(&self, owner: &Pubkey) -> u64 {
        self.vault.token_balance(owner).unwrap()
    }

    pub fn total_staked(&self) -> u64 {
        self.vault.vault_state().unwrap().unwrap().total_staked
    }

    pub fn stake_info(&self, user: &Pubkey) -> StakeInfo {
        self.vault.get_stake_info(user).unwrap().unwrap()
    }

    /// Checks vault total == Σ staked == custody balance, and the
    /// is_staked flag of every record.
    pub fn assert_invariants(&self) {
        let accounts = self.vault.store().snapshot().unwrap();
        let mut sum = 0u64;
        for data in accounts.values() {
            if data.len() != StakeInfo::LEN {
                continue;
            }
            if let Ok(info) = StakeInfo::unpack(data) {
                assert_eq!(info.is_staked, info.staked_amount > 0);
                sum += info.staked_amount;
            }
        }
        assert_eq!(self.total_staked(), sum);
        assert_eq!(self.vault.custody_balance().unwrap(), sum);
    }
}
