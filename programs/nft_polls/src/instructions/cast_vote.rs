use anchor_lang::prelude::*;
use crate::constants::VOTE_SEED;
use crate::errors::PollError;
use crate::events::VoteCast;
use crate::states::{Poll, Tally, VoteRecord};

pub fn handler(ctx: Context<CastVote>, is_upvote: bool) -> Result<VoteOutcome> {
    let poll_info = ctx.accounts.poll.to_account_info();
    let poll_key = poll_info.key();
    let voter = ctx.accounts.voter.key();
    let vote_record = ctx.accounts.vote_record.key();
    let bump = ctx.bumps.vote_record;

    let mut poll = Poll::load(&poll_info)?;
    let tally = apply(
        &mut poll,
        &mut ctx.accounts.vote_record,
        poll_key,
        voter,
        is_upvote,
        bump,
    )?;
    poll.store(&poll_info)?;

    msg!("Vote recorded by {} on {}", voter, poll_key);
    emit!(VoteCast {
        poll: poll_key,
        voter,
        is_upvote,
        upvotes: tally.upvotes,
        downvotes: tally.downvotes,
    });
    Ok(VoteOutcome { vote_record, tally })
}

/// Counts the vote and writes the receipt. Both land in the same
/// transaction; any error below discards the pair.
pub fn apply(
    poll: &mut Poll,
    vote_record: &mut VoteRecord,
    poll_key: Pubkey,
    voter: Pubkey,
    is_upvote: bool,
    bump: u8,
) -> Result<Tally> {
    require!(poll.is_active, PollError::PollClosed);

    vote_record.cast(poll_key, voter, is_upvote, bump)?;
    poll.record_vote(is_upvote)
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteOutcome {
    pub vote_record: Pubkey,
    pub tally: Tally,
}

#[derive(Accounts)]
pub struct CastVote<'info> {
    #[account(mut)]
    pub voter: Signer<'info>,

    /// CHECK: decoded by `Poll::load`, which checks owner, type and address
    #[account(mut)]
    pub poll: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = voter,
        space = VoteRecord::SPACE,
        seeds = [VOTE_SEED, poll.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub vote_record: Account<'info, VoteRecord>,

    pub system_program: Program<'info, System>,
}
