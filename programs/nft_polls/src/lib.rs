use anchor_lang::prelude::*;

pub mod address;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod reader;
pub mod states;

use instructions::*;

declare_id!("3D34sLyTu4dJ9KjYmHCo9da1sQSqPxFaM8wBJNDib7FS");

#[program]
pub mod nft_polls {
    use super::*;

    /// Opens the one poll that may ever exist for `subject_id`.
    pub fn create_poll(ctx: Context<CreatePoll>, subject_id: Pubkey) -> Result<Pubkey> {
        create_poll::handler(ctx, subject_id)
    }

    pub fn cast_vote(ctx: Context<CastVote>, is_upvote: bool) -> Result<VoteOutcome> {
        cast_vote::handler(ctx, is_upvote)
    }

    pub fn close_poll(ctx: Context<ClosePoll>) -> Result<()> {
        close_poll::handler(ctx)
    }
}
