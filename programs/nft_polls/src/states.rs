use anchor_lang::prelude::*;
use anchor_lang::{AccountDeserialize, AccountSerialize};
use crate::address;
use crate::constants::{POLL_SEED, VOTE_SEED};
use crate::errors::PollError;

/// One votable subject, stored at `["poll", subject_id]`.
///
/// Fields only change through [`Poll::open`], [`Poll::record_vote`] and
/// [`Poll::close`]. A zeroed account (default owner) is an unopened slot.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Poll {
    pub owner: Pubkey,
    pub subject_id: Pubkey,
    pub upvotes: u32,
    pub downvotes: u32,
    pub is_active: bool,
    pub created_at: i64,
    pub bump: u8,
}
impl Poll {
    // 8 discriminator + 32 + 32 + 4 + 4 + 1 + 8 + 1
    pub const SPACE: usize = 8 + 32 + 32 + 4 + 4 + 1 + 8 + 1;

    pub fn is_created(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn status(&self) -> PollStatus {
        if self.is_active {
            PollStatus::Open
        } else {
            PollStatus::Closed
        }
    }

    pub fn tally(&self) -> Tally {
        Tally {
            upvotes: self.upvotes,
            downvotes: self.downvotes,
        }
    }

    /// Claims an empty poll slot. A slot can be claimed exactly once.
    pub fn open(&mut self, owner: Pubkey, subject_id: Pubkey, created_at: i64, bump: u8) -> Result<()> {
        require!(!self.is_created(), PollError::AlreadyExists);

        *self = Self {
            owner,
            subject_id,
            upvotes: 0,
            downvotes: 0,
            is_active: true,
            created_at,
            bump,
        };
        Ok(())
    }

    pub fn record_vote(&mut self, is_upvote: bool) -> Result<Tally> {
        require!(self.is_active, PollError::PollClosed);

        let counter = if is_upvote {
            &mut self.upvotes
        } else {
            &mut self.downvotes
        };
        *counter = counter.checked_add(1).ok_or(PollError::TallyOverflow)?;

        Ok(self.tally())
    }

    /// Open -> Closed. There is no way back.
    pub fn close(&mut self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *caller, PollError::Unauthorized);
        require!(self.is_active, PollError::PollAlreadyClosed);

        self.is_active = false;
        Ok(())
    }

    /// Recreates this poll's address from the stored subject and bump.
    pub fn address(&self) -> Result<Pubkey> {
        address::recreate(POLL_SEED, &[self.subject_id.as_ref()], self.bump)
    }

    /// Decodes the poll stored at `at`. Empty data, data of another record
    /// type and unopened slots are all `NotFound`.
    pub fn from_account_data(at: &Pubkey, data: &[u8]) -> Result<Self> {
        let mut bytes = data;
        let poll = Self::try_deserialize(&mut bytes).map_err(|_| error!(PollError::NotFound))?;
        require!(poll.is_created(), PollError::NotFound);

        address::verify(POLL_SEED, &[poll.subject_id.as_ref()], poll.bump, at)?;
        Ok(poll)
    }

    /// Loads the poll behind an unchecked account. Accounts the program
    /// does not own hold no poll.
    pub fn load(info: &AccountInfo) -> Result<Self> {
        require_keys_eq!(*info.owner, crate::ID, PollError::NotFound);
        let data = info.try_borrow_data()?;
        Self::from_account_data(info.key, &data[..])
    }

    /// Writes the poll back into the account it was loaded from.
    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        self.try_serialize(&mut writer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollStatus {
    Open,
    Closed,
}

/// One voter's decision on one poll, stored at `["vote", poll, voter]`. Write-once.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct VoteRecord {
    pub poll: Pubkey,
    pub voter: Pubkey,
    pub voted: bool,
    pub is_upvote: bool,
    pub bump: u8,
}
impl VoteRecord {
    // 8 discriminator + 32 + 32 + 1 + 1 + 1
    pub const SPACE: usize = 8 + 32 + 32 + 1 + 1 + 1;

    pub fn cast(&mut self, poll: Pubkey, voter: Pubkey, is_upvote: bool, bump: u8) -> Result<()> {
        require!(!self.voted, PollError::AlreadyVoted);

        *self = Self {
            poll,
            voter,
            voted: true,
            is_upvote,
            bump,
        };
        Ok(())
    }

    pub fn address(&self) -> Result<Pubkey> {
        address::recreate(VOTE_SEED, &[self.poll.as_ref(), self.voter.as_ref()], self.bump)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub upvotes: u32,
    pub downvotes: u32,
}
impl Tally {
    pub fn total(&self) -> u64 {
        self.upvotes as u64 + self.downvotes as u64
    }

    /// Net score, upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use crate::address::{poll_address, vote_address};

    fn open_poll(owner: Pubkey) -> Poll {
        let subject = Pubkey::new_unique();
        let (_, bump) = poll_address(&subject);
        let mut poll = Poll::default();
        poll.open(owner, subject, 1_700_000_000, bump).unwrap();
        poll
    }

    #[test]
    fn open_starts_active_with_empty_tally() {
        let owner = Pubkey::new_unique();
        let poll = open_poll(owner);

        assert!(poll.is_created());
        assert_eq!(poll.owner, owner);
        assert_eq!(poll.status(), PollStatus::Open);
        assert_eq!(poll.tally(), Tally::default());
        assert_eq!(poll.created_at, 1_700_000_000);
        assert_eq!(poll.address().unwrap(), poll_address(&poll.subject_id).0);
    }

    #[test]
    fn open_refuses_claimed_slot() {
        let mut poll = open_poll(Pubkey::new_unique());
        let before = poll.clone();

        let err = poll.open(Pubkey::new_unique(), Pubkey::new_unique(), 42, 0).unwrap_err();
        assert_eq!(err, Error::from(PollError::AlreadyExists));
        assert_eq!(poll, before);
    }

    #[test]
    fn votes_land_on_the_right_counter() {
        let mut poll = open_poll(Pubkey::new_unique());
        poll.record_vote(true).unwrap();
        poll.record_vote(true).unwrap();
        let tally = poll.record_vote(false).unwrap();

        assert_eq!(tally, Tally { upvotes: 2, downvotes: 1 });
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.score(), 1);
    }

    #[test]
    fn tally_overflow_is_an_error() {
        let mut poll = open_poll(Pubkey::new_unique());
        poll.upvotes = u32::MAX;

        let err = poll.record_vote(true).unwrap_err();
        assert_eq!(err, Error::from(PollError::TallyOverflow));
        assert_eq!(poll.upvotes, u32::MAX);
    }

    #[test]
    fn closed_poll_rejects_votes() {
        let owner = Pubkey::new_unique();
        let mut poll = open_poll(owner);
        poll.record_vote(false).unwrap();
        poll.close(&owner).unwrap();

        let err = poll.record_vote(true).unwrap_err();
        assert_eq!(err, Error::from(PollError::PollClosed));
        assert_eq!(poll.tally(), Tally { upvotes: 0, downvotes: 1 });
    }

    #[test]
    fn close_is_one_way() {
        let owner = Pubkey::new_unique();
        let mut poll = open_poll(owner);

        poll.close(&owner).unwrap();
        assert_eq!(poll.status(), PollStatus::Closed);

        let err = poll.close(&owner).unwrap_err();
        assert_eq!(err, Error::from(PollError::PollAlreadyClosed));
        assert_eq!(poll.status(), PollStatus::Closed);
    }

    #[test]
    fn ownership_is_checked_before_state() {
        let owner = Pubkey::new_unique();
        let mut poll = open_poll(owner);
        poll.close(&owner).unwrap();

        let err = poll.close(&Pubkey::new_unique()).unwrap_err();
        assert_eq!(err, Error::from(PollError::Unauthorized));
    }

    fn encode<T: AccountSerialize>(record: &T) -> Vec<u8> {
        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn poll_decodes_at_its_own_address() {
        let poll = open_poll(Pubkey::new_unique());
        let at = poll.address().unwrap();

        assert_eq!(Poll::from_account_data(&at, &encode(&poll)).unwrap(), poll);
    }

    #[test]
    fn absent_or_foreign_data_is_not_found() {
        let at = poll_address(&Pubkey::new_unique()).0;

        let err = Poll::from_account_data(&at, &[]).unwrap_err();
        assert_eq!(err, Error::from(PollError::NotFound));

        let mut record = VoteRecord::default();
        record.cast(at, Pubkey::new_unique(), true, 0).unwrap();
        let err = Poll::from_account_data(&at, &encode(&record)).unwrap_err();
        assert_eq!(err, Error::from(PollError::NotFound));

        // allocated by init_if_needed but never opened
        let err = Poll::from_account_data(&at, &encode(&Poll::default())).unwrap_err();
        assert_eq!(err, Error::from(PollError::NotFound));
    }

    #[test]
    fn poll_at_wrong_address_is_rejected() {
        let poll = open_poll(Pubkey::new_unique());
        let err = Poll::from_account_data(&Pubkey::new_unique(), &encode(&poll)).unwrap_err();
        assert_eq!(err, Error::from(PollError::AddressMismatch));
    }

    #[test]
    fn vote_record_is_write_once() {
        let poll = Pubkey::new_unique();
        let voter = Pubkey::new_unique();
        let (address, bump) = vote_address(&poll, &voter);

        let mut record = VoteRecord::default();
        record.cast(poll, voter, false, bump).unwrap();
        assert!(record.voted);
        assert_eq!(record.address().unwrap(), address);

        let err = record.cast(poll, voter, true, bump).unwrap_err();
        assert_eq!(err, Error::from(PollError::AlreadyVoted));
        assert!(!record.is_upvote);
    }
}
