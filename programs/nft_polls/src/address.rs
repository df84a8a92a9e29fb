use anchor_lang::prelude::*;
use crate::constants::{IDENTIFIER_LEN, POLL_SEED, VOTE_SEED};
use crate::errors::PollError;

/// Derives the program address of a record from its domain tag and key parts.
///
/// Returns the address together with the bump that pushed it off the ed25519
/// curve. The bump is stored on the record so the address can later be
/// recreated with [`verify`] without searching again.
pub fn derive(tag: &[u8], parts: &[&[u8]]) -> (Pubkey, u8) {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(parts.len() + 1);
    seeds.push(tag);
    seeds.extend_from_slice(parts);
    Pubkey::find_program_address(&seeds, &crate::ID)
}

/// Same as [`derive`] for untrusted input: every part must be a raw key.
///
/// For off-chain callers holding identifiers as bytes (request bodies,
/// indexer rows) rather than typed keys. The program itself always has
/// `Pubkey`s and uses [`derive`].
pub fn derive_from_slices(tag: &[u8], parts: &[&[u8]]) -> Result<(Pubkey, u8)> {
    for part in parts {
        require!(part.len() == IDENTIFIER_LEN, PollError::InvalidIdentifier);
    }
    Ok(derive(tag, parts))
}

pub fn poll_address(subject_id: &Pubkey) -> (Pubkey, u8) {
    derive(POLL_SEED, &[subject_id.as_ref()])
}

pub fn vote_address(poll: &Pubkey, voter: &Pubkey) -> (Pubkey, u8) {
    derive(VOTE_SEED, &[poll.as_ref(), voter.as_ref()])
}

/// Recreates an address from its seeds and stored bump and checks it against `expected`.
pub fn verify(tag: &[u8], parts: &[&[u8]], bump: u8, expected: &Pubkey) -> Result<()> {
    let address = recreate(tag, parts, bump)?;
    require_keys_eq!(address, *expected, PollError::AddressMismatch);
    Ok(())
}

pub(crate) fn recreate(tag: &[u8], parts: &[&[u8]], bump: u8) -> Result<Pubkey> {
    let bump = [bump];
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(parts.len() + 2);
    seeds.push(tag);
    seeds.extend_from_slice(parts);
    seeds.push(&bump);
    Pubkey::create_program_address(&seeds, &crate::ID)
        .map_err(|_| error!(PollError::AddressMismatch))
}
