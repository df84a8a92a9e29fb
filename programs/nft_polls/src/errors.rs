use anchor_lang::prelude::*;

#[error_code]
pub enum PollError {
    #[msg("A poll already exists for this subject")]
    AlreadyExists,
    #[msg("No record exists at this address")]
    NotFound,
    #[msg("Voting is closed for this poll")]
    PollClosed,
    #[msg("You have already voted on this poll")]
    AlreadyVoted,
    #[msg("Only the poll owner may perform this action")]
    Unauthorized,
    #[msg("Poll is already closed")]
    PollAlreadyClosed,

    #[msg("Identifier must be 32 bytes")]
    InvalidIdentifier,
    #[msg("Record address does not match its seeds")]
    AddressMismatch,
    #[msg("Tally overflow")]
    TallyOverflow,
    #[msg("Account data is not a record of the expected type")]
    AccountDecode,
}
