use crate::constants::*;
use crate::events::{DrawRequested, RandomWordsRequested};
use crate::state::*;
use crate::utils::transfer_lamports;
use anchor_lang::prelude::*;

/// Accounts required to close the round and request randomness.
///
/// Any keeper may send this; eligibility is checked against the raffle
/// itself, and the request is charged to the raffle's subscription.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    /// The keeper triggering the draw. Only pays the transaction fee.
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, raffle.creator.as_ref()],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(mut, address = raffle.vrf_coordinator)]
    pub coordinator: Account<'info, VrfCoordinator>,

    #[account(
        mut,
        seeds = [
            SUBSCRIPTION_SEED,
            coordinator.key().as_ref(),
            raffle.subscription_id.to_le_bytes().as_ref()
        ],
        bump = subscription.bump,
    )]
    pub subscription: Account<'info, Subscription>,
}

pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle_key = ctx.accounts.raffle.key();

    let request_id = {
        let mut oracle = CoordinatorHandle {
            coordinator: &mut ctx.accounts.coordinator,
            subscription: &mut ctx.accounts.subscription,
            now: clock.unix_timestamp,
        };
        ctx.accounts
            .raffle
            .request_draw(&mut oracle, raffle_key, clock.unix_timestamp)?
    };

    // Move the request fee from the subscription to the coordinator.
    let subscription_info = ctx.accounts.subscription.to_account_info();
    let reserve = Rent::get()?.minimum_balance(subscription_info.data_len());
    transfer_lamports(
        &subscription_info,
        &ctx.accounts.coordinator.to_account_info(),
        ctx.accounts.coordinator.request_fee,
        reserve,
    )?;

    msg!("Requested raffle winner, request id {}", request_id);

    emit!(RandomWordsRequested {
        coordinator: ctx.accounts.coordinator.key(),
        request_id,
        subscription_id: ctx.accounts.subscription.id,
        consumer: raffle_key,
        num_words: ctx.accounts.raffle.num_words,
    });
    emit!(DrawRequested {
        raffle: raffle_key,
        request_id,
        round: ctx.accounts.raffle.round.saturating_add(1),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
