//! Token movements, executed by the SPL-Token program itself.
//!
//! Every operation builds the real `spl_token` instruction, hands the batch's
//! copies of the referenced accounts to `spl_token::processor::Processor`, and
//! stages whatever the token program changed. The bootstrap helpers stand up
//! the mint and user accounts the vault expects to already exist.

use num_traits::FromPrimitive;
use solana_program::{
    account_info::AccountInfo,
    instruction::Instruction,
    msg,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    rent::Rent,
    sysvar::{self, Sysvar},
};
use spl_token::{
    error::TokenError,
    instruction as token_instruction,
    processor::Processor,
    state::{Account as TokenAccount, Mint},
};

use crate::error::StakeVaultError;
use crate::store::{AccountStore, WriteBatch};

pub fn load_mint<S: AccountStore + ?Sized>(
    batch: &WriteBatch<'_, S>,
    key: &Pubkey,
) -> Result<Mint, StakeVaultError> {
    let data = batch.read(key)?.ok_or(StakeVaultError::InvalidMint)?;
    Mint::unpack(&data).map_err(|_| StakeVaultError::InvalidMint)
}

pub fn load_token_account<S: AccountStore + ?Sized>(
    batch: &WriteBatch<'_, S>,
    key: &Pubkey,
) -> Result<TokenAccount, StakeVaultError> {
    let data = batch
        .read(key)?
        .ok_or(StakeVaultError::InvalidTokenAccount)?;
    TokenAccount::unpack(&data).map_err(|_| StakeVaultError::InvalidTokenAccount)
}

/// Translates a token program failure into the vault's error kinds.
pub fn token_error(err: ProgramError) -> StakeVaultError {
    let code = match err {
        ProgramError::Custom(code) => code,
        ProgramError::MissingRequiredSignature => return StakeVaultError::Unauthorized,
        _ => return StakeVaultError::InvalidTokenAccount,
    };
    match TokenError::from_u32(code) {
        Some(TokenError::InsufficientFunds) => StakeVaultError::InsufficientBalance,
        Some(TokenError::InvalidMint) => StakeVaultError::InvalidMint,
        Some(TokenError::MintMismatch) => StakeVaultError::MintMismatch,
        Some(TokenError::OwnerMismatch) => StakeVaultError::InvalidOwner,
        Some(TokenError::FixedSupply) => StakeVaultError::Unauthorized,
        Some(TokenError::AlreadyInUse) => StakeVaultError::AlreadyInitialized,
        Some(TokenError::AccountFrozen) => StakeVaultError::AccountFrozen,
        Some(TokenError::Overflow) => StakeVaultError::Overflow,
        _ => StakeVaultError::InvalidTokenAccount,
    }
}

/// Batch-side copy of one account referenced by a token instruction.
struct Loaded {
    key: Pubkey,
    is_signer: bool,
    is_writable: bool,
    lamports: u64,
    owner: Pubkey,
    original: Vec<u8>,
    data: Vec<u8>,
}

/// Runs `ix` through the token program against the batch.
///
/// `allocate` names an account being created by `ix`; if it is absent from
/// the batch it is handed over zeroed at the given size.
fn invoke<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    ix: &Instruction,
    allocate: Option<(&Pubkey, usize)>,
) -> Result<(), StakeVaultError> {
    let rent = Rent::default();
    let mut loaded = Vec::with_capacity(ix.accounts.len());
    for meta in &ix.accounts {
        let (owner, data) = if sysvar::rent::check_id(&meta.pubkey) {
            (sysvar::id(), vec![0u8; Rent::size_of()])
        } else if meta.is_signer {
            // wallets and vault addresses sign; the token program never reads them
            (Pubkey::default(), Vec::new())
        } else {
            let data = match (batch.read(&meta.pubkey)?, allocate) {
                (Some(data), _) => data,
                (None, Some((key, len))) if *key == meta.pubkey => vec![0u8; len],
                (None, _) => Vec::new(),
            };
            (spl_token::id(), data)
        };
        loaded.push(Loaded {
            key: meta.pubkey,
            is_signer: meta.is_signer,
            is_writable: meta.is_writable,
            lamports: rent.minimum_balance(data.len()),
            owner,
            original: data.clone(),
            data,
        });
    }

    let mut infos = Vec::with_capacity(loaded.len());
    for account in loaded.iter_mut() {
        let mut info = AccountInfo::new(
            &account.key,
            account.is_signer,
            account.is_writable,
            &mut account.lamports,
            &mut account.data,
            &account.owner,
            false,
            0,
        );
        if sysvar::rent::check_id(info.key) {
            rent.to_account_info(&mut info)
                .ok_or(StakeVaultError::InvalidAccountData)?;
        }
        infos.push(info);
    }

    Processor::process(&ix.program_id, &infos, &ix.data).map_err(token_error)?;
    drop(infos);

    for account in loaded {
        if account.is_writable && account.data != account.original {
            batch.write(account.key, account.data);
        }
    }
    Ok(())
}

/// Moves `amount` from `source` to `destination`. `authority` must own `source`.
pub fn transfer<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    source: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Result<(), StakeVaultError> {
    let ix = token_instruction::transfer(
        &spl_token::id(),
        source,
        destination,
        authority,
        &[],
        amount,
    )
    .map_err(token_error)?;
    invoke(batch, &ix, None).inspect_err(|e| msg!("Token transfer failed: {}", e))
}

pub fn initialize_mint<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    key: Pubkey,
    mint_authority: &Pubkey,
    decimals: u8,
) -> Result<(), StakeVaultError> {
    let ix =
        token_instruction::initialize_mint(&spl_token::id(), &key, mint_authority, None, decimals)
            .map_err(token_error)?;
    invoke(batch, &ix, Some((&key, Mint::LEN)))
}

pub fn initialize_account<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    key: Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<(), StakeVaultError> {
    let ix = token_instruction::initialize_account(&spl_token::id(), &key, mint, owner)
        .map_err(token_error)?;
    invoke(batch, &ix, Some((&key, TokenAccount::LEN)))
}

pub fn mint_to<S: AccountStore + ?Sized>(
    batch: &mut WriteBatch<'_, S>,
    mint_key: &Pubkey,
    destination: &Pubkey,
    mint_authority: &Pubkey,
    amount: u64,
) -> Result<(), StakeVaultError> {
    let ix = token_instruction::mint_to(
        &spl_token::id(),
        mint_key,
        destination,
        mint_authority,
        &[],
        amount,
    )
    .map_err(token_error)?;
    invoke(batch, &ix, None)
}
