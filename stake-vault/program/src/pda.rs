use solana_program::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::constants::{REWARD_SEED, STAKE_INFO_SEED, TOKEN_SEED, VAULT_SEED};

/// Derives `(namespace, owner)` keys under `program_id`.
pub fn derive(program_id: &Pubkey, namespace: &[u8], owner: &[&[u8]]) -> (Pubkey, u8) {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(owner.len() + 1);
    seeds.push(namespace);
    seeds.extend_from_slice(owner);
    Pubkey::find_program_address(&seeds, program_id)
}

pub fn find_vault_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    derive(program_id, VAULT_SEED, &[mint.as_ref()])
}

pub fn find_custody_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    derive(program_id, TOKEN_SEED, &[mint.as_ref()])
}

pub fn find_reward_vault_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    derive(program_id, REWARD_SEED, &[mint.as_ref()])
}

// The user key is always part of the seeds, otherwise every staker would
// share one record.
pub fn find_stake_info_address(program_id: &Pubkey, user: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    derive(program_id, STAKE_INFO_SEED, &[user.as_ref(), mint.as_ref()])
}

/// A user's token account for `mint`.
pub fn user_token_address(user: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(user, mint)
}

/// The fixed addresses of one vault, resolved once per [`StakeVault`](crate::vault::StakeVault).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultAddresses {
    pub vault: Pubkey,
    pub vault_bump: u8,
    pub custody: Pubkey,
    pub reward_vault: Pubkey,
}

impl VaultAddresses {
    pub fn resolve(program_id: &Pubkey, mint: &Pubkey) -> Self {
        let (vault, vault_bump) = find_vault_address(program_id, mint);
        let (custody, _) = find_custody_address(program_id, mint);
        let (reward_vault, _) = find_reward_vault_address(program_id, mint);
        Self {
            vault,
            vault_bump,
            custody,
            reward_vault,
        }
    }
}
