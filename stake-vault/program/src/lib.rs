//! Token staking vault: per-mint custody of staked tokens, per-user stake
//! records and slot-based rewards, laid out like a native Solana program but
//! running against any [`store::AccountStore`].

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod pda;
pub mod processor;
pub mod state;
pub mod store;
pub mod token;
pub mod vault;

pub use clock::{ManualClock, SlotClock, SystemSlotClock};
pub use config::VaultConfig;
pub use error::StakeVaultError;
pub use processor::{StakeVaultInstruction, process_instruction};
pub use state::{StakeInfo, VaultState};
pub use store::{AccountStore, MemoryStore, WriteBatch};
pub use vault::StakeVault;

solana_program::declare_id!("928n3NhG3nsH6No8Qyr45qgzcdDy5Kn4bkfLNgiKULwu");
