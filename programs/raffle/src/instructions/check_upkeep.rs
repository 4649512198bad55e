use crate::state::*;
use anchor_lang::prelude::*;

/// Read-only access to a raffle, for view instructions.
#[derive(Accounts)]
pub struct ViewRaffle<'info> {
    pub raffle: Account<'info, Raffle>,
}

/// Reports whether a draw can be requested now and, if not, why.
pub fn process_check_upkeep(ctx: Context<ViewRaffle>) -> Result<UpkeepCheck> {
    let clock = Clock::get()?;
    Ok(ctx.accounts.raffle.check_upkeep(clock.unix_timestamp))
}

pub fn process_get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
    ctx.accounts.raffle.player(index)
}

pub fn process_get_raffle_summary(ctx: Context<ViewRaffle>) -> Result<RaffleSummary> {
    Ok(ctx.accounts.raffle.summary())
}
