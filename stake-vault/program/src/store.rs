use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use solana_program::pubkey::Pubkey;

use crate::error::StakeVaultError;

/// Keyed account storage the vault runs on top of.
///
/// `commit` must apply every write or none of them.
pub trait AccountStore: Send + Sync {
    fn read(&self, key: &Pubkey) -> Result<Option<Vec<u8>>, StakeVaultError>;

    fn commit(&self, writes: HashMap<Pubkey, Vec<u8>>) -> Result<(), StakeVaultError>;
}

/// In-process store: one map behind a reader/writer lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<Pubkey, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every account, for audits and tests.
    pub fn snapshot(&self) -> Result<HashMap<Pubkey, Vec<u8>>, StakeVaultError> {
        self.accounts
            .read()
            .map(|accounts| accounts.clone())
            .map_err(|_| StakeVaultError::StoreUnavailable)
    }
}

impl AccountStore for MemoryStore {
    fn read(&self, key: &Pubkey) -> Result<Option<Vec<u8>>, StakeVaultError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StakeVaultError::StoreUnavailable)?;
        Ok(accounts.get(key).cloned())
    }

    fn commit(&self, writes: HashMap<Pubkey, Vec<u8>>) -> Result<(), StakeVaultError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StakeVaultError::StoreUnavailable)?;
        accounts.extend(writes);
        Ok(())
    }
}

/// Writes staged for a single operation. Reads see staged data first.
/// Dropping the batch discards everything.
pub struct WriteBatch<'a, S: AccountStore + ?Sized> {
    store: &'a S,
    staged: HashMap<Pubkey, Vec<u8>>,
}

impl<'a, S: AccountStore + ?Sized> WriteBatch<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            staged: HashMap::new(),
        }
    }

    pub fn read(&self, key: &Pubkey) -> Result<Option<Vec<u8>>, StakeVaultError> {
        match self.staged.get(key) {
            Some(data) => Ok(Some(data.clone())),
            None => self.store.read(key),
        }
    }

    pub fn exists(&self, key: &Pubkey) -> Result<bool, StakeVaultError> {
        Ok(self.read(key)?.is_some())
    }

    pub fn write(&mut self, key: Pubkey, data: Vec<u8>) {
        self.staged.insert(key, data);
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    pub fn commit(self) -> Result<(), StakeVaultError> {
        if self.staged.is_empty() {
            return Ok(());
        }
        self.store.commit(self.staged)
    }
}
