use crate::constants::*;
use crate::error::ErrorCode;
use crate::oracle::{RandomWordsRequest, RandomnessOracle};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RaffleState {
    /// Accepting entries.
    Open,
    /// A draw is outstanding; entries are rejected until it is fulfilled.
    Calculating,
}

#[account]
#[derive(InitSpace)]
pub struct Raffle {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The account that created the raffle; part of the PDA seeds.
    pub creator: Pubkey,

    /// The VRF coordinator whose authority alone may fulfill draws.
    pub vrf_coordinator: Pubkey,

    /// Subscription the coordinator charges for each request.
    pub subscription_id: u64,

    /// Gas lane forwarded with each randomness request.
    pub key_hash: [u8; 32],
    pub callback_gas_limit: u32,
    pub request_confirmations: u16,
    pub num_words: u32,

    /// The price (in lamports) of a single entry. Fixed at creation.
    pub entrance_fee: u64,

    /// Minimum number of seconds between two draws.
    pub interval: i64,

    /// UNIX timestamp of the last payout, or of creation.
    pub last_timestamp: i64,

    pub state: RaffleState,

    /// Lamports owed to the next winner. The lamports themselves sit on
    /// this account on top of its rent-exempt minimum.
    pub pool_balance: u64,

    /// Id of the outstanding randomness request while `Calculating`.
    pub pending_request_id: Option<u64>,

    /// Switchboard randomness account committed to the outstanding draw.
    /// Only this account may later settle it.
    pub randomness_account: Option<Pubkey>,

    pub recent_winner: Option<Pubkey>,

    /// Number of completed payouts.
    pub round: u64,

    /// Entries of the current round, in order. A player may appear
    /// more than once.
    #[max_len(MAX_PLAYERS)]
    pub players: Vec<Pubkey>,
}

/// Construction parameters of a raffle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeRaffleParams {
    pub entrance_fee: u64,
    pub interval: i64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
    pub request_confirmations: u16,
    pub num_words: u32,
}

impl InitializeRaffleParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.entrance_fee > 0, ErrorCode::InvalidConfig);
        require!(self.interval > 0, ErrorCode::InvalidConfig);
        require!(
            self.num_words >= 1 && self.num_words <= MAX_NUM_WORDS,
            ErrorCode::InvalidConfig
        );
        Ok(())
    }
}

/// Result of an eligibility check. `reasons` is a mask of the
/// `UPKEEP_*` bits for every condition that failed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    pub reasons: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RaffleSummary {
    pub entrance_fee: u64,
    pub number_of_players: u64,
    pub state: RaffleState,
    pub recent_winner: Option<Pubkey>,
    pub last_timestamp: i64,
    pub interval: i64,
    pub num_words: u32,
    pub request_confirmations: u16,
    pub pool_balance: u64,
    pub round: u64,
}

/// What a fulfilled draw owes, computed after the round has been reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub winner: Pubkey,
    pub amount: u64,
    pub round: u64,
}

impl Raffle {
    pub fn init(
        &mut self,
        bump: u8,
        creator: Pubkey,
        vrf_coordinator: Pubkey,
        params: &InitializeRaffleParams,
        now: i64,
    ) -> Result<()> {
        params.validate()?;

        self.bump = bump;
        self.creator = creator;
        self.vrf_coordinator = vrf_coordinator;
        self.subscription_id = params.subscription_id;
        self.key_hash = params.key_hash;
        self.callback_gas_limit = params.callback_gas_limit;
        self.request_confirmations = params.request_confirmations;
        self.num_words = params.num_words;
        self.entrance_fee = params.entrance_fee;
        self.interval = params.interval;
        self.last_timestamp = now;
        self.state = RaffleState::Open;
        self.pool_balance = 0;
        self.pending_request_id = None;
        self.randomness_account = None;
        self.recent_winner = None;
        self.round = 0;
        self.players = Vec::new();
        Ok(())
    }

    /// Records an entry and returns the lamports the entrant must be charged.
    ///
    /// Only `entrance_fee` is ever charged; an `amount_paid` above it is a
    /// ceiling, not a payment, so the excess stays with the entrant.
    pub fn enter(&mut self, player: Pubkey, amount_paid: u64) -> Result<u64> {
        require!(
            amount_paid >= self.entrance_fee,
            ErrorCode::InsufficientPayment
        );
        require!(self.state == RaffleState::Open, ErrorCode::RoundNotOpen);
        require!(self.players.len() < MAX_PLAYERS, ErrorCode::RaffleFull);

        self.pool_balance = self
            .pool_balance
            .checked_add(self.entrance_fee)
            .ok_or(ErrorCode::MathOverflow)?;
        self.players.push(player);

        Ok(self.entrance_fee)
    }

    pub fn check_upkeep(&self, now: i64) -> UpkeepCheck {
        let mut reasons = 0;
        if self.state != RaffleState::Open {
            reasons |= UPKEEP_NOT_OPEN;
        }
        if now.saturating_sub(self.last_timestamp) < self.interval {
            reasons |= UPKEEP_INTERVAL_NOT_ELAPSED;
        }
        if self.players.is_empty() {
            reasons |= UPKEEP_NO_PLAYERS;
        }
        if self.pool_balance == 0 {
            reasons |= UPKEEP_NO_BALANCE;
        }

        UpkeepCheck {
            upkeep_needed: reasons == 0,
            reasons,
        }
    }

    /// Closes the round and asks `oracle` for randomness on behalf of
    /// `consumer` (this raffle's address). Returns the request id.
    pub fn request_draw<O: RandomnessOracle + ?Sized>(
        &mut self,
        oracle: &mut O,
        consumer: Pubkey,
        now: i64,
    ) -> Result<u64> {
        let check = self.check_upkeep(now);
        if !check.upkeep_needed {
            msg!(
                "Upkeep not needed: balance {}, players {}, state {:?}, reasons {:#06b}",
                self.pool_balance,
                self.players.len(),
                self.state,
                check.reasons
            );
            return err!(ErrorCode::NotEligible);
        }

        let request_id = oracle.request_random_words(consumer, &self.random_words_request())?;

        self.state = RaffleState::Calculating;
        self.pending_request_id = Some(request_id);

        Ok(request_id)
    }

    /// Rejects anything but the reply to the outstanding request.
    pub fn ensure_pending(&self, request_id: u64) -> Result<()> {
        require!(
            self.state == RaffleState::Calculating && self.pending_request_id == Some(request_id),
            ErrorCode::UnknownRequest
        );
        Ok(())
    }

    /// Binds a Switchboard randomness account to the outstanding draw.
    /// The account must have been seeded in the previous slot, so its value
    /// cannot be known yet.
    pub fn commit_randomness(
        &mut self,
        request_id: u64,
        randomness_account: Pubkey,
        seed_slot: u64,
        current_slot: u64,
    ) -> Result<()> {
        self.ensure_pending(request_id)?;
        require!(
            self.randomness_account.is_none(),
            ErrorCode::RandomnessAlreadyCommitted
        );
        if current_slot.checked_sub(1) != Some(seed_slot) {
            msg!("Seed slot: {}", seed_slot);
            msg!("Current slot: {}", current_slot);
            return err!(ErrorCode::RandomnessAlreadyRevealed);
        }

        self.randomness_account = Some(randomness_account);
        Ok(())
    }

    pub fn ensure_committed_randomness(&self, randomness_account: &Pubkey) -> Result<()> {
        require!(
            self.randomness_account == Some(*randomness_account),
            ErrorCode::IncorrectRandomnessAccount
        );
        Ok(())
    }

    /// Picks `players[random_words[0] % players.len()]` and resets the round.
    ///
    /// The reset happens here, before the caller moves any lamports, so a
    /// failed transfer must abort the whole instruction for the round to
    /// stay `Calculating`.
    pub fn fulfill_draw(
        &mut self,
        request_id: u64,
        random_words: &[u64],
        now: i64,
    ) -> Result<Payout> {
        self.ensure_pending(request_id)?;
        let seed = *random_words
            .first()
            .ok_or(ErrorCode::MissingRandomWords)?;
        require!(!self.players.is_empty(), ErrorCode::NoPlayers);

        let index = (seed % self.players.len() as u64) as usize;
        let winner = self.players[index];
        let amount = self.pool_balance;
        let round = self.round.checked_add(1).ok_or(ErrorCode::MathOverflow)?;

        self.recent_winner = Some(winner);
        self.players.clear();
        self.pool_balance = 0;
        self.pending_request_id = None;
        self.randomness_account = None;
        self.state = RaffleState::Open;
        self.last_timestamp = now;
        self.round = round;

        Ok(Payout {
            winner,
            amount,
            round,
        })
    }

    pub fn random_words_request(&self) -> RandomWordsRequest {
        RandomWordsRequest {
            key_hash: self.key_hash,
            subscription_id: self.subscription_id,
            request_confirmations: self.request_confirmations,
            callback_gas_limit: self.callback_gas_limit,
            num_words: self.num_words,
        }
    }

    pub fn number_of_players(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn player(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.players.get(i))
            .copied()
            .ok_or_else(|| error!(ErrorCode::IndexOutOfRange))
    }

    pub fn summary(&self) -> RaffleSummary {
        RaffleSummary {
            entrance_fee: self.entrance_fee,
            number_of_players: self.number_of_players(),
            state: self.state,
            recent_winner: self.recent_winner,
            last_timestamp: self.last_timestamp,
            interval: self.interval,
            num_words: self.num_words,
            request_confirmations: self.request_confirmations,
            pool_balance: self.pool_balance,
            round: self.round,
        }
    }
}
