use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{
    ConsumerAdded, CoordinatorInitialized, SubscriptionCreated, SubscriptionFunded,
};
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::system_program;

#[derive(Accounts)]
pub struct InitializeCoordinator<'info> {
    /// The oracle identity; the only signer allowed to fulfill requests.
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + VrfCoordinator::INIT_SPACE,
        seeds = [COORDINATOR_SEED, authority.key().as_ref()],
        bump
    )]
    pub coordinator: Box<Account<'info, VrfCoordinator>>,

    pub system_program: Program<'info, System>,
}

pub fn process_initialize_coordinator(
    ctx: Context<InitializeCoordinator>,
    request_fee: u64,
) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    ctx.accounts
        .coordinator
        .init(ctx.bumps.coordinator, authority, request_fee);

    msg!("Coordinator initialized for oracle {}", authority);
    msg!("Request fee: {} lamports", request_fee);

    emit!(CoordinatorInitialized {
        coordinator: ctx.accounts.coordinator.key(),
        authority,
        request_fee,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct CreateSubscription<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [COORDINATOR_SEED, coordinator.authority.as_ref()],
        bump = coordinator.bump,
    )]
    pub coordinator: Box<Account<'info, VrfCoordinator>>,

    #[account(
        init,
        payer = owner,
        space = 8 + Subscription::INIT_SPACE,
        seeds = [
            SUBSCRIPTION_SEED,
            coordinator.key().as_ref(),
            (coordinator.subscription_count + 1).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub subscription: Account<'info, Subscription>,

    pub system_program: Program<'info, System>,
}

pub fn process_create_subscription(ctx: Context<CreateSubscription>) -> Result<()> {
    let coordinator_key = ctx.accounts.coordinator.key();
    let owner = ctx.accounts.owner.key();
    let subscription_id = ctx.accounts.coordinator.next_subscription_id()?;

    ctx.accounts.subscription.init(
        ctx.bumps.subscription,
        coordinator_key,
        subscription_id,
        owner,
    );

    msg!("Subscription {} created", subscription_id);
    emit!(SubscriptionCreated {
        coordinator: coordinator_key,
        subscription_id,
        owner,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct FundSubscription<'info> {
    /// Anyone may top up a subscription.
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [
            SUBSCRIPTION_SEED,
            subscription.coordinator.as_ref(),
            subscription.id.to_le_bytes().as_ref()
        ],
        bump = subscription.bump,
    )]
    pub subscription: Account<'info, Subscription>,

    pub system_program: Program<'info, System>,
}

/// Moves `amount` lamports into the subscription and credits its balance.
pub fn process_fund_subscription(ctx: Context<FundSubscription>, amount: u64) -> Result<()> {
    let old_balance = ctx.accounts.subscription.balance;
    let new_balance = ctx.accounts.subscription.fund(amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.funder.to_account_info(),
                to: ctx.accounts.subscription.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(SubscriptionFunded {
        subscription_id: ctx.accounts.subscription.id,
        old_balance,
        new_balance,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AddConsumer<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [
            SUBSCRIPTION_SEED,
            subscription.coordinator.as_ref(),
            subscription.id.to_le_bytes().as_ref()
        ],
        bump = subscription.bump,
        constraint = subscription.owner == owner.key() @ ErrorCode::NotSubscriptionOwner,
    )]
    pub subscription: Account<'info, Subscription>,
}

pub fn process_add_consumer(ctx: Context<AddConsumer>, consumer: Pubkey) -> Result<()> {
    ctx.accounts.subscription.add_consumer(consumer)?;

    msg!(
        "Consumer {} added to subscription {}",
        consumer,
        ctx.accounts.subscription.id
    );
    emit!(ConsumerAdded {
        subscription_id: ctx.accounts.subscription.id,
        consumer,
    });
    Ok(())
}
