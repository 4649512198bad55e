use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::RandomnessCommitted;
use crate::state::*;
use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

/// Accounts required to commit a Switchboard randomness account to the
/// outstanding draw of a raffle.
///
/// Ensures:
/// 1. Only the oracle authority of the raffle's coordinator can commit.
/// 2. The randomness account has not been revealed yet.
#[derive(Accounts)]
pub struct CommitRandomness<'info> {
    pub oracle: Signer<'info>,

    #[account(
        seeds = [COORDINATOR_SEED, coordinator.authority.as_ref()],
        bump = coordinator.bump,
        constraint = coordinator.authority == oracle.key() @ ErrorCode::UnauthorizedCaller,
    )]
    pub coordinator: Account<'info, VrfCoordinator>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, raffle.creator.as_ref()],
        bump = raffle.bump,
        constraint = raffle.vrf_coordinator == coordinator.key() @ ErrorCode::UnauthorizedCaller,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_commit_randomness(ctx: Context<CommitRandomness>, request_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let randomness_key = ctx.accounts.randomness_account_data.key();

    let seed_slot = RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
        .map_err(|_| {
            msg!("Failed to parse randomness account data");
            ErrorCode::InvalidRandomnessAccount
        })?
        .seed_slot;

    ctx.accounts
        .raffle
        .commit_randomness(request_id, randomness_key, seed_slot, clock.slot)?;

    msg!("Committed randomness account {}", randomness_key);

    emit!(RandomnessCommitted {
        raffle: ctx.accounts.raffle.key(),
        request_id,
        randomness_account: randomness_key,
    });

    Ok(())
}
