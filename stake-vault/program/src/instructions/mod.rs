pub mod claim_rewards;
pub mod fund_rewards;
pub mod initialize_vault;
pub mod shared;
pub mod stake;
pub mod unstake;

pub use claim_rewards::{ClaimRewardsAccounts, claim_rewards};
pub use fund_rewards::{FundRewardsAccounts, fund_rewards};
pub use initialize_vault::{InitializeVaultAccounts, initialize_vault};
pub use stake::{StakeAccounts, stake};
pub use unstake::{UnstakeAccounts, unstake};
