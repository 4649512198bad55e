#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;
use state::{InitializeRaffleParams, RaffleSummary, UpkeepCheck};

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod oracle;
pub mod state;
pub mod utils;

declare_id!("CSYg2nRQZjfeAWuvwKfEUQMNtWzhjVQHUrdAhVtK44qv");

#[program]
pub mod raffle {
    use super::*;

    pub fn initialize_coordinator(
        ctx: Context<InitializeCoordinator>,
        request_fee: u64,
    ) -> Result<()> {
        process_initialize_coordinator(ctx, request_fee)
    }

    pub fn create_subscription(ctx: Context<CreateSubscription>) -> Result<()> {
        process_create_subscription(ctx)
    }

    pub fn fund_subscription(ctx: Context<FundSubscription>, amount: u64) -> Result<()> {
        process_fund_subscription(ctx, amount)
    }

    pub fn add_consumer(ctx: Context<AddConsumer>, consumer: Pubkey) -> Result<()> {
        process_add_consumer(ctx, consumer)
    }

    pub fn initialize_raffle(
        ctx: Context<InitializeRaffle>,
        params: InitializeRaffleParams,
    ) -> Result<()> {
        process_initialize_raffle(ctx, params)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount_paid: u64) -> Result<()> {
        process_enter_raffle(ctx, amount_paid)
    }

    pub fn check_upkeep(ctx: Context<ViewRaffle>) -> Result<UpkeepCheck> {
        process_check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        process_perform_upkeep(ctx)
    }

    /// Binds a Switchboard randomness account to the outstanding draw.
    pub fn commit_randomness(ctx: Context<CommitRandomness>, request_id: u64) -> Result<()> {
        process_commit_randomness(ctx, request_id)
    }

    /// Oracle callback. Only the coordinator's authority may call it.
    pub fn fulfill_random_words<'info>(
        ctx: Context<'_, '_, '_, 'info, FulfillRandomWords<'info>>,
        request_id: u64,
        random_words: Vec<u64>,
    ) -> Result<()> {
        process_fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn fulfill_random_words_from_switchboard<'info>(
        ctx: Context<'_, '_, '_, 'info, FulfillFromSwitchboard<'info>>,
        request_id: u64,
    ) -> Result<()> {
        process_fulfill_from_switchboard(ctx, request_id)
    }

    pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
        process_get_player(ctx, index)
    }

    pub fn get_raffle_summary(ctx: Context<ViewRaffle>) -> Result<RaffleSummary> {
        process_get_raffle_summary(ctx)
    }
}
