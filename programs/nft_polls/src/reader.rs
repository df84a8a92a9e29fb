//! Read-only view of the ledger for off-chain callers.
//!
//! Nothing here mutates a record. Lookups go straight to the derived
//! address, so "has this voter voted" is one account read, never a scan.

use anchor_lang::prelude::*;
use anchor_lang::error::Error;
use anchor_lang::{AccountDeserialize, Discriminator};
use crate::address::{self, poll_address, vote_address};
use crate::constants::{POLL_SEED, VOTE_SEED};
use crate::errors::PollError;
use crate::states::{Poll, VoteRecord};

/// Raw account access, usually backed by an RPC client.
pub trait AccountSource {
    fn account_data(&self, address: &Pubkey) -> Option<Vec<u8>>;

    /// Every account owned by the program, in no particular order.
    fn program_accounts(&self) -> Vec<(Pubkey, Vec<u8>)>;
}

fn decode<T: AccountDeserialize>(data: &[u8]) -> Result<T> {
    let mut bytes = data;
    T::try_deserialize(&mut bytes).map_err(|_| error!(PollError::AccountDecode))
}

pub fn fetch_poll<S: AccountSource + ?Sized>(source: &S, address: &Pubkey) -> Result<Poll> {
    let data = source.account_data(address).ok_or(PollError::NotFound)?;
    let poll: Poll = decode(&data)?;
    address::verify(POLL_SEED, &[poll.subject_id.as_ref()], poll.bump, address)?;
    Ok(poll)
}

pub fn fetch_vote_record<S: AccountSource + ?Sized>(source: &S, address: &Pubkey) -> Result<VoteRecord> {
    let data = source.account_data(address).ok_or(PollError::NotFound)?;
    let record: VoteRecord = decode(&data)?;
    address::verify(VOTE_SEED, &[record.poll.as_ref(), record.voter.as_ref()], record.bump, address)?;
    Ok(record)
}

pub fn poll_for_subject<S: AccountSource + ?Sized>(source: &S, subject_id: &Pubkey) -> Result<(Pubkey, Poll)> {
    let (address, _) = poll_address(subject_id);
    Ok((address, fetch_poll(source, &address)?))
}

pub fn has_voted<S: AccountSource + ?Sized>(source: &S, poll: &Pubkey, voter: &Pubkey) -> Result<bool> {
    let (address, _) = vote_address(poll, voter);
    match source.account_data(&address) {
        Some(data) => Ok(decode::<VoteRecord>(&data)?.voted),
        None => Ok(false),
    }
}

#[derive(Debug, Default)]
pub struct PollListing {
    pub polls: Vec<(Pubkey, Poll)>,
    /// Accounts tagged as polls that failed to decode or sit at an address
    /// their seeds do not derive.
    pub rejected: Vec<(Pubkey, Error)>,
}

/// All polls the source knows about. Accounts of other types are skipped.
pub fn all_polls<S: AccountSource + ?Sized>(source: &S) -> PollListing {
    let mut listing = PollListing::default();
    for (address, data) in source.program_accounts() {
        if !data.starts_with(Poll::DISCRIMINATOR) {
            continue;
        }
        match checked_poll(&address, &data) {
            Ok(poll) => listing.polls.push((address, poll)),
            Err(err) => {
                msg!("Skipping poll account {}: {}", address, err);
                listing.rejected.push((address, err));
            }
        }
    }
    listing
}

fn checked_poll(at: &Pubkey, data: &[u8]) -> Result<Poll> {
    let poll: Poll = decode(data)?;
    let derived = poll.address()?;
    require_keys_eq!(derived, *at, PollError::AddressMismatch);
    Ok(poll)
}
