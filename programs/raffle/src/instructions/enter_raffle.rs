use crate::constants::*;
use crate::events::RaffleEntered;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::system_program;

/// Accounts required to enter the current round.
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The entrant; pays the entrance fee.
    #[account(mut)]
    pub player: Signer<'info>,

    /// Raffle state account tracking the current round.
    #[account(
        mut,
        seeds = [RAFFLE_SEED, raffle.creator.as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// System program interface
    pub system_program: Program<'info, System>,
}

/// Enters the caller into the current round.
///
/// `amount_paid` is the most the player agrees to pay. It must cover the
/// entrance fee; exactly the fee is transferred into the raffle account.
///
/// # Arguments
/// * `ctx` - Context containing EnterRaffle accounts
/// * `amount_paid` - Lamports offered for the entry
pub fn process_enter_raffle(ctx: Context<EnterRaffle>, amount_paid: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let charged = ctx.accounts.raffle.enter(player, amount_paid)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.raffle.to_account_info(),
            },
        ),
        charged,
    )?;

    msg!("Entered raffle: {}", player);

    emit!(RaffleEntered {
        raffle: ctx.accounts.raffle.key(),
        player,
        amount: charged,
        players: ctx.accounts.raffle.number_of_players(),
    });

    Ok(())
}
