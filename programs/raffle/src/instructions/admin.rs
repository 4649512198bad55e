use crate::constants::*;
use crate::events::RaffleInitialized;
use crate::state::*;
use anchor_lang::prelude::*;

/// Accounts required to create a raffle.
/// The raffle is a PDA of its creator and is bound to one VRF coordinator
/// for its whole lifetime.
#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The Raffle state account; also custodies the pool.
    #[account(
        init,
        payer = payer,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [RAFFLE_SEED, payer.key().as_ref()],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// The coordinator that will serve this raffle's draws.
    pub vrf_coordinator: Account<'info, VrfCoordinator>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Initializes the raffle with its entrance fee, draw interval and the
/// tuning forwarded to the coordinator on every draw.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeRaffle accounts
/// * `params` - Construction parameters, immutable afterwards
pub fn process_initialize_raffle(
    ctx: Context<InitializeRaffle>,
    params: InitializeRaffleParams,
) -> Result<()> {
    let clock = Clock::get()?;
    let raffle_key = ctx.accounts.raffle.key();
    let coordinator_key = ctx.accounts.vrf_coordinator.key();
    let creator = ctx.accounts.payer.key();

    let raffle = &mut ctx.accounts.raffle;
    raffle.init(
        ctx.bumps.raffle,
        creator,
        coordinator_key,
        &params,
        clock.unix_timestamp,
    )?;

    msg!("Raffle initialized: {}", raffle_key);
    msg!("Entrance fee: {} lamports", params.entrance_fee);
    msg!("Interval: {}s", params.interval);

    emit!(RaffleInitialized {
        raffle: raffle_key,
        vrf_coordinator: coordinator_key,
        entrance_fee: params.entrance_fee,
        interval: params.interval,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
