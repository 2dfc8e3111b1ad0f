use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{entrypoint::ProgramResult, msg, pubkey::Pubkey};

use crate::clock::SlotClock;
use crate::error::StakeVaultError;
use crate::store::AccountStore;
use crate::vault::StakeVault;

/// Instructions supported by the program
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum StakeVaultInstruction {
    /// Create the vault for the configured mint. Signer must be the mint authority.
    InitializeVault,
    /// Move `amount` from the signer's token account into custody.
    Stake { amount: u64 },
    /// Return `amount` of the signer's stake.
    Unstake { amount: u64 },
    /// Authority tops up the reward pool.
    FundRewards { amount: u64 },
    /// Pay the signer's accrued rewards.
    ClaimRewards,
}

impl StakeVaultInstruction {
    pub fn pack(&self) -> Result<Vec<u8>, StakeVaultError> {
        borsh::to_vec(self).map_err(|_| StakeVaultError::InvalidInstruction)
    }

    pub fn unpack(instruction_data: &[u8]) -> Result<Self, StakeVaultError> {
        Self::try_from_slice(instruction_data).map_err(|_| StakeVaultError::InvalidInstruction)
    }
}

pub fn process_instruction<S: AccountStore, C: SlotClock>(
    vault: &StakeVault<S, C>,
    signer: &Pubkey,
    instruction_data: &[u8],
) -> ProgramResult {
    msg!("StakeVault program entrypoint");
    let instruction = StakeVaultInstruction::unpack(instruction_data)?;
    msg!("Instruction: {:?}", instruction);

    let result = match instruction {
        StakeVaultInstruction::InitializeVault => vault.initialize(signer).map(|_| ()),
        StakeVaultInstruction::Stake { amount } => vault.stake(signer, amount).map(|_| ()),
        StakeVaultInstruction::Unstake { amount } => vault.unstake(signer, amount).map(|_| ()),
        StakeVaultInstruction::FundRewards { amount } => {
            vault.fund_rewards(signer, amount).map(|_| ())
        }
        StakeVaultInstruction::ClaimRewards => vault.claim_rewards(signer).map(|_| ()),
    };

    result.map_err(|e| {
        msg!("Error: {}", e);
        e.into()
    })
}
