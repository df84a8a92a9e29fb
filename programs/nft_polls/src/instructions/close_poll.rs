use anchor_lang::prelude::*;
use crate::events::PollClosed;
use crate::states::Poll;

pub fn handler(ctx: Context<ClosePoll>) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    let poll_info = ctx.accounts.poll.to_account_info();

    let mut poll = Poll::load(&poll_info)?;
    apply(&mut poll, &caller)?;
    poll.store(&poll_info)?;

    msg!("Poll {} closed by owner {}", poll_info.key(), poll.owner);
    emit!(PollClosed {
        poll: poll_info.key(),
        owner: poll.owner,
        upvotes: poll.upvotes,
        downvotes: poll.downvotes,
    });
    Ok(())
}

pub fn apply(poll: &mut Poll, caller: &Pubkey) -> Result<()> {
    poll.close(caller)
}

#[derive(Accounts)]
pub struct ClosePoll<'info> {
    pub authority: Signer<'info>,

    /// CHECK: decoded by `Poll::load`, which checks owner, type and address
    #[account(mut)]
    pub poll: UncheckedAccount<'info>,
}
