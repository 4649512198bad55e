use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{RandomWordsFulfilled, WinnerPicked};
use crate::oracle::{derive_random_words, expand_seed};
use crate::state::*;
use crate::utils::{find_account, transfer_lamports};
use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

/// Accounts required to deliver randomness to a raffle.
///
/// This ensures that:
/// 1. The signer is the oracle authority of the coordinator.
/// 2. The raffle is bound to that coordinator.
///
/// The winner's account must be passed among the remaining accounts.
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    /// The oracle authority delivering the randomness.
    pub oracle: Signer<'info>,

    #[account(
        mut,
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
}

/// Same as `FulfillRandomWords`, with the random value taken from a
/// revealed Switchboard on-demand randomness account. The account must be
/// the one committed to the draw by `commit_randomness`.
#[derive(Accounts)]
pub struct FulfillFromSwitchboard<'info> {
    pub fulfill: FulfillRandomWords<'info>,

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

enum WordSource {
    Supplied(Vec<u64>),
    Seed([u8; 32]),
}

/// Delivers `random_words` for `request_id`. An empty list makes the
/// coordinator derive the words from the request id.
pub fn process_fulfill_random_words<'info>(
    ctx: Context<'_, '_, '_, 'info, FulfillRandomWords<'info>>,
    request_id: u64,
    random_words: Vec<u64>,
) -> Result<()> {
    settle_draw(
        ctx.accounts,
        ctx.remaining_accounts,
        request_id,
        WordSource::Supplied(random_words),
    )
}

pub fn process_fulfill_from_switchboard<'info>(
    ctx: Context<'_, '_, '_, 'info, FulfillFromSwitchboard<'info>>,
    request_id: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .fulfill
        .raffle
        .ensure_committed_randomness(&ctx.accounts.randomness_account_data.key())?;

    let revealed_random_value = {
        let randomness_data =
            RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
                .map_err(|_| {
                    msg!("Failed to parse randomness account data");
                    ErrorCode::InvalidRandomnessAccount
                })?;
        randomness_data
            .get_value(&clock)
            .map_err(|_| ErrorCode::RandomnessNotResolved)?
    };

    msg!("Randomness result: {}", revealed_random_value[0]);

    settle_draw(
        &mut ctx.accounts.fulfill,
        ctx.remaining_accounts,
        request_id,
        WordSource::Seed(revealed_random_value),
    )
}

fn settle_draw<'info>(
    accounts: &mut FulfillRandomWords<'info>,
    remaining_accounts: &[AccountInfo<'info>],
    request_id: u64,
    source: WordSource,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let reserve = Rent::get()?.minimum_balance(accounts.raffle.to_account_info().data_len());

    let payout = settle(
        &mut accounts.raffle,
        &mut accounts.coordinator,
        remaining_accounts,
        request_id,
        source,
        now,
        reserve,
    )?;

    emit!(RandomWordsFulfilled {
        coordinator: accounts.coordinator.key(),
        request_id,
        consumer: accounts.raffle.key(),
    });
    emit!(WinnerPicked {
        raffle: accounts.raffle.key(),
        winner: payout.winner,
        prize: payout.amount,
        round: payout.round,
        timestamp: now,
    });

    Ok(())
}

/// Consumes the coordinator's pending request, resets the round and pays
/// the winner, keeping `reserve` lamports on the raffle. Any failure,
/// including the payout, aborts the instruction and leaves the raffle
/// `Calculating`.
fn settle<'info>(
    raffle: &mut Account<'info, Raffle>,
    coordinator: &mut VrfCoordinator,
    remaining_accounts: &[AccountInfo<'info>],
    request_id: u64,
    source: WordSource,
    now: i64,
    reserve: u64,
) -> Result<Payout> {
    let raffle_key = raffle.key();

    raffle.ensure_pending(request_id)?;
    let pending = coordinator.take_request(request_id, &raffle_key)?;

    let random_words = match source {
        WordSource::Supplied(words) if !words.is_empty() => words,
        WordSource::Supplied(_) => derive_random_words(request_id, pending.num_words),
        WordSource::Seed(seed) => expand_seed(&seed, pending.num_words),
    };

    let payout = raffle.fulfill_draw(request_id, &random_words, now)?;

    let winner = find_account(remaining_accounts, &payout.winner).ok_or_else(|| {
        msg!("Winner account {} not supplied", payout.winner);
        error!(ErrorCode::TransferFailed)
    })?;
    transfer_lamports(&raffle.to_account_info(), winner, payout.amount, reserve)?;

    msg!("Winner: {}", payout.winner);
    msg!("Prize: {} lamports", payout.amount);

    Ok(payout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const ENTRANCE_FEE: u64 = 10;
    const REQUEST_FEE: u64 = 3;
    const INTERVAL: i64 = 30;
    const START: i64 = 1_000;
    const NOW: i64 = START + INTERVAL + 1;
    const RESERVE: u64 = 1_000_000;

    struct Setup {
        oracle: Pubkey,
        coordinator_key: Pubkey,
        coordinator: VrfCoordinator,
        raffle_key: Pubkey,
        raffle: Raffle,
        request_id: u64,
    }

    impl Setup {
        /// A raffle bound to its coordinator with a draw outstanding.
        fn new(players: &[Pubkey]) -> Self {
            let oracle = Pubkey::new_unique();
            let (coordinator_key, coordinator_bump) =
                Pubkey::find_program_address(&[COORDINATOR_SEED, oracle.as_ref()], &crate::ID);
            let mut coordinator = VrfCoordinator {
                bump: 0,
                authority: Pubkey::default(),
                request_fee: 0,
                next_request_id: 0,
                subscription_count: 0,
                fees_collected: 0,
                pending_requests: Vec::new(),
            };
            coordinator.init(coordinator_bump, oracle, REQUEST_FEE);

            let creator = Pubkey::new_unique();
            let (raffle_key, raffle_bump) =
                Pubkey::find_program_address(&[RAFFLE_SEED, creator.as_ref()], &crate::ID);

            let mut subscription = Subscription {
                bump: 0,
                coordinator: Pubkey::default(),
                id: 0,
                owner: Pubkey::default(),
                balance: 0,
                request_count: 0,
                consumers: Vec::new(),
            };
            let subscription_id = coordinator.next_subscription_id().unwrap();
            subscription.init(255, coordinator_key, subscription_id, Pubkey::new_unique());
            subscription.add_consumer(raffle_key).unwrap();
            subscription.fund(REQUEST_FEE).unwrap();

            let mut raffle = Raffle {
                bump: 0,
                creator: Pubkey::default(),
                vrf_coordinator: Pubkey::default(),
                subscription_id: 0,
                key_hash: [0u8; 32],
                callback_gas_limit: 0,
                request_confirmations: 0,
                num_words: 0,
                entrance_fee: 0,
                interval: 0,
                last_timestamp: 0,
                state: RaffleState::Open,
                pool_balance: 0,
                pending_request_id: None,
                randomness_account: None,
                recent_winner: None,
                round: 0,
                players: Vec::new(),
            };
            let params = InitializeRaffleParams {
                entrance_fee: ENTRANCE_FEE,
                interval: INTERVAL,
                key_hash: [0u8; 32],
                subscription_id,
                callback_gas_limit: DEFAULT_CALLBACK_GAS_LIMIT,
                request_confirmations: DEFAULT_REQUEST_CONFIRMATIONS,
                num_words: DEFAULT_NUM_WORDS,
            };
            raffle
                .init(raffle_bump, creator, coordinator_key, &params, START)
                .unwrap();
            for player in players {
                raffle.enter(*player, ENTRANCE_FEE).unwrap();
            }

            let now = START + INTERVAL;
            let mut handle = CoordinatorHandle {
                coordinator: &mut coordinator,
                subscription: &mut subscription,
                now,
            };
            let request_id = raffle.request_draw(&mut handle, raffle_key, now).unwrap();

            Self {
                oracle,
                coordinator_key,
                coordinator,
                raffle_key,
                raffle,
                request_id,
            }
        }

        fn raffle_account(&self) -> Account<'static, Raffle> {
            let lamports = RESERVE + self.raffle.pool_balance;
            let info = Box::leak(Box::new(account_info(
                self.raffle_key,
                false,
                true,
                lamports,
                serialized(&self.raffle),
                crate::ID,
            )));
            Account::try_from(info).unwrap()
        }

        fn fulfill_infos(&self, signer: Pubkey, raffle: &Raffle) -> &'static [AccountInfo<'static>] {
            vec![
                account_info(signer, true, false, 0, Vec::new(), Pubkey::default()),
                account_info(
                    self.coordinator_key,
                    false,
                    true,
                    RESERVE,
                    serialized(&self.coordinator),
                    crate::ID,
                ),
                account_info(self.raffle_key, false, true, RESERVE, serialized(raffle), crate::ID),
            ]
            .leak()
        }
    }

    fn account_info(
        key: Pubkey,
        is_signer: bool,
        is_writable: bool,
        lamports: u64,
        data: Vec<u8>,
        owner: Pubkey,
    ) -> AccountInfo<'static> {
        AccountInfo::new(
            Box::leak(Box::new(key)),
            is_signer,
            is_writable,
            Box::leak(Box::new(lamports)),
            data.leak(),
            Box::leak(Box::new(owner)),
            false,
            0,
        )
    }

    fn wallets(keys: &[Pubkey], is_writable: bool) -> &'static [AccountInfo<'static>] {
        keys.iter()
            .map(|key| account_info(*key, false, is_writable, 0, Vec::new(), Pubkey::default()))
            .collect::<Vec<_>>()
            .leak()
    }

    fn serialized<T: AccountSerialize>(account: &T) -> Vec<u8> {
        let mut data = Vec::new();
        account.try_serialize(&mut data).unwrap();
        data
    }

    fn fulfill_accounts(mut infos: &'static [AccountInfo<'static>]) -> Result<()> {
        FulfillRandomWords::try_accounts(
            &crate::ID,
            &mut infos,
            &[],
            &mut FulfillRandomWordsBumps::default(),
            &mut BTreeSet::new(),
        )
        .map(|_| ())
    }

    fn error_code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            anchor_lang::error::Error::ProgramError(_) => u32::MAX,
        }
    }

    #[test]
    fn test_coordinator_authority_passes_account_checks() {
        let setup = Setup::new(&[Pubkey::new_unique()]);
        let infos = setup.fulfill_infos(setup.oracle, &setup.raffle);
        fulfill_accounts(infos).unwrap();
    }

    #[test]
    fn test_other_signer_is_unauthorized() {
        let setup = Setup::new(&[Pubkey::new_unique()]);
        let infos = setup.fulfill_infos(Pubkey::new_unique(), &setup.raffle);
        let raffle_data = infos[2].data.borrow().to_vec();

        let err = fulfill_accounts(infos).unwrap_err();

        assert_eq!(error_code(err), u32::from(ErrorCode::UnauthorizedCaller));
        assert_eq!(infos[2].data.borrow().to_vec(), raffle_data);
    }

    #[test]
    fn test_raffle_bound_to_other_coordinator_is_unauthorized() {
        let setup = Setup::new(&[Pubkey::new_unique()]);
        let mut foreign = setup.raffle.clone();
        foreign.vrf_coordinator = Pubkey::new_unique();
        let infos = setup.fulfill_infos(setup.oracle, &foreign);

        let err = fulfill_accounts(infos).unwrap_err();

        assert_eq!(error_code(err), u32::from(ErrorCode::UnauthorizedCaller));
    }

    #[test]
    fn test_settle_pays_winner_exactly_the_pool() {
        let players = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let mut setup = Setup::new(&players);
        let mut raffle = setup.raffle_account();
        let remaining = wallets(&players, true);

        let payout = settle(
            &mut raffle,
            &mut setup.coordinator,
            remaining,
            setup.request_id,
            WordSource::Supplied(vec![4]),
            NOW,
            RESERVE,
        )
        .unwrap();

        assert_eq!(payout.winner, players[1]);
        assert_eq!(payout.amount, 3 * ENTRANCE_FEE);
        assert_eq!(remaining[1].lamports(), 3 * ENTRANCE_FEE);
        assert_eq!(remaining[0].lamports(), 0);
        assert_eq!(raffle.to_account_info().lamports(), RESERVE);
        assert_eq!(raffle.state, RaffleState::Open);
        assert_eq!(raffle.recent_winner, Some(players[1]));
        assert_eq!(raffle.last_timestamp, NOW);
        assert!(setup.coordinator.pending(setup.request_id).is_none());
    }

    #[test]
    fn test_settle_derives_words_when_none_supplied() {
        let players = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let mut setup = Setup::new(&players);
        let mut raffle = setup.raffle_account();
        let remaining = wallets(&players, true);

        let payout = settle(
            &mut raffle,
            &mut setup.coordinator,
            remaining,
            setup.request_id,
            WordSource::Supplied(Vec::new()),
            NOW,
            RESERVE,
        )
        .unwrap();

        let word = derive_random_words(setup.request_id, DEFAULT_NUM_WORDS)[0];
        assert_eq!(payout.winner, players[(word % 3) as usize]);
    }

    #[test]
    fn test_settle_at_most_once() {
        let player = Pubkey::new_unique();
        let mut setup = Setup::new(&[player]);
        let mut raffle = setup.raffle_account();
        let remaining = wallets(&[player], true);

        settle(
            &mut raffle,
            &mut setup.coordinator,
            remaining,
            setup.request_id,
            WordSource::Supplied(vec![0]),
            NOW,
            RESERVE,
        )
        .unwrap();
        let err = settle(
            &mut raffle,
            &mut setup.coordinator,
            remaining,
            setup.request_id,
            WordSource::Supplied(vec![0]),
            NOW,
            RESERVE,
        )
        .unwrap_err();

        assert_eq!(error_code(err), u32::from(ErrorCode::UnknownRequest));
        assert_eq!(remaining[0].lamports(), ENTRANCE_FEE);
        assert_eq!(raffle.round, 1);
    }

    #[test]
    fn test_settle_without_winner_account_fails() {
        let mut setup = Setup::new(&[Pubkey::new_unique()]);
        let mut raffle = setup.raffle_account();
        let bystanders = wallets(&[Pubkey::new_unique()], true);

        let err = settle(
            &mut raffle,
            &mut setup.coordinator,
            bystanders,
            setup.request_id,
            WordSource::Supplied(vec![0]),
            NOW,
            RESERVE,
        )
        .unwrap_err();

        assert_eq!(error_code(err), u32::from(ErrorCode::TransferFailed));
        assert_eq!(raffle.to_account_info().lamports(), RESERVE + ENTRANCE_FEE);
        assert_eq!(bystanders[0].lamports(), 0);
    }

    #[test]
    fn test_settle_to_readonly_winner_fails() {
        let player = Pubkey::new_unique();
        let mut setup = Setup::new(&[player]);
        let mut raffle = setup.raffle_account();
        let remaining = wallets(&[player], false);

        let err = settle(
            &mut raffle,
            &mut setup.coordinator,
            remaining,
            setup.request_id,
            WordSource::Supplied(vec![0]),
            NOW,
            RESERVE,
        )
        .unwrap_err();

        assert_eq!(error_code(err), u32::from(ErrorCode::TransferFailed));
        assert_eq!(raffle.to_account_info().lamports(), RESERVE + ENTRANCE_FEE);
        assert_eq!(remaining[0].lamports(), 0);
    }
}
