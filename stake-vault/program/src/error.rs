use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::program_error::ProgramError;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error, FromPrimitive)]
pub enum StakeVaultError {
    // Authority checks
    #[error("Signer is not the vault authority")]
    Unauthorized,
    #[error("Vault is already initialized")]
    AlreadyInitialized,
    #[error("Vault is not initialized")]
    UninitializedVault,

    // Amount checks
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Insufficient user balance")]
    InsufficientBalance,
    #[error("Unstake amount exceeds staked amount")]
    InsufficientStake,
    #[error("No stake found for this user")]
    NoStakeFound,

    // Rewards
    #[error("Reward pool cannot cover pending rewards")]
    InsufficientRewards,
    #[error("No rewards to claim")]
    NoRewards,

    // Token accounts
    #[error("Invalid token mint")]
    InvalidMint,
    #[error("Invalid token account")]
    InvalidTokenAccount,
    #[error("Invalid token account owner")]
    InvalidOwner,
    #[error("Source and destination mint mismatch")]
    MintMismatch,
    #[error("Token account is frozen")]
    AccountFrozen,

    #[error("Overflow occurred")]
    Overflow,
    #[error("Invalid account data")]
    InvalidAccountData,
    #[error("Invalid instruction")]
    InvalidInstruction,
    #[error("Account store unavailable")]
    StoreUnavailable,
}

impl StakeVaultError {
    /// Recovers the vault error behind a `ProgramError::Custom` code.
    pub fn from_program_error(error: &ProgramError) -> Option<Self> {
        match error {
            ProgramError::Custom(code) => Self::from_u32(*code),
            _ => None,
        }
    }
}

impl From<StakeVaultError> for ProgramError {
    fn from(e: StakeVaultError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_code_maps_back_to_variant() {
        let err: ProgramError = StakeVaultError::InsufficientStake.into();
        assert_eq!(err, ProgramError::Custom(5));
        assert_eq!(
            StakeVaultError::from_program_error(&err),
            Some(StakeVaultError::InsufficientStake)
        );
    }

    #[test]
    fn foreign_errors_do_not_decode() {
        assert_eq!(
            StakeVaultError::from_program_error(&ProgramError::InvalidArgument),
            None
        );
        assert_eq!(
            StakeVaultError::from_program_error(&ProgramError::Custom(9_999)),
            None
        );
    }
}
