use anchor_lang::prelude::*;
use crate::constants::POLL_SEED;
use crate::events::PollCreated;
use crate::states::Poll;

pub fn handler(ctx: Context<CreatePoll>, subject_id: Pubkey) -> Result<Pubkey> {
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.authority.key();
    let poll_key = ctx.accounts.poll.key();
    let bump = ctx.bumps.poll;

    apply(&mut ctx.accounts.poll, owner, subject_id, now, bump)?;

    msg!("Poll {} opened for subject {}", poll_key, subject_id);
    emit!(PollCreated {
        poll: poll_key,
        owner,
        subject_id,
        created_at: now,
    });
    Ok(poll_key)
}

/// The poll account is write-locked for the whole transaction, so claiming
/// the slot here is the store's create-if-absent step: a second creation for
/// the same subject always sees the first one's owner and fails.
pub fn apply(poll: &mut Poll, owner: Pubkey, subject_id: Pubkey, now: i64, bump: u8) -> Result<()> {
    poll.open(owner, subject_id, now, bump)
}

#[derive(Accounts)]
#[instruction(subject_id: Pubkey)]
pub struct CreatePoll<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        space = Poll::SPACE,
        seeds = [POLL_SEED, subject_id.as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    pub system_program: Program<'info, System>,
}
