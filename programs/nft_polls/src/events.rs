use anchor_lang::prelude::*;

#[event]
pub struct PollCreated {
    pub poll: Pubkey,
    pub owner: Pubkey,
    pub subject_id: Pubkey,
    pub created_at: i64,
}

#[event]
pub struct VoteCast {
    pub poll: Pubkey,
    pub voter: Pubkey,
    pub is_upvote: bool,
    pub upvotes: u32,
    pub downvotes: u32,
}

/// Final tallies are frozen at the values carried here.
#[event]
pub struct PollClosed {
    pub poll: Pubkey,
    pub owner: Pubkey,
    pub upvotes: u32,
    pub downvotes: u32,
}
