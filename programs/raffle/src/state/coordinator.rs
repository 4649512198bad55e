use crate::constants::*;
use crate::error::ErrorCode;
use crate::oracle::{RandomWordsRequest, RandomnessOracle};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct PendingRequest {
    pub request_id: u64,
    pub subscription_id: u64,
    pub consumer: Pubkey,
    pub num_words: u32,
    pub requested_at: i64,
}

/// Randomness coordinator that consumers pay through subscriptions.
#[account]
#[derive(InitSpace)]
pub struct VrfCoordinator {
    pub bump: u8,

    /// The oracle identity. Only this key may fulfill requests.
    pub authority: Pubkey,

    /// Lamports charged to a subscription per request.
    pub request_fee: u64,

    /// Id handed to the next request. Starts at 1.
    pub next_request_id: u64,

    pub subscription_count: u64,

    pub fees_collected: u64,

    #[max_len(MAX_PENDING_REQUESTS)]
    pub pending_requests: Vec<PendingRequest>,
}

#[account]
#[derive(InitSpace)]
pub struct Subscription {
    pub bump: u8,
    pub coordinator: Pubkey,
    pub id: u64,
    pub owner: Pubkey,

    /// Prepaid lamports available for request fees.
    pub balance: u64,

    pub request_count: u64,

    #[max_len(MAX_CONSUMERS)]
    pub consumers: Vec<Pubkey>,
}

impl VrfCoordinator {
    pub fn init(&mut self, bump: u8, authority: Pubkey, request_fee: u64) {
        self.bump = bump;
        self.authority = authority;
        self.request_fee = request_fee;
        self.next_request_id = 1;
        self.subscription_count = 0;
        self.fees_collected = 0;
        self.pending_requests = Vec::new();
    }

    /// Reserves the next subscription id.
    pub fn next_subscription_id(&mut self) -> Result<u64> {
        self.subscription_count = self
            .subscription_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(self.subscription_count)
    }

    /// Registers a request charged to `subscription` and returns its id.
    pub fn request(
        &mut self,
        subscription: &mut Subscription,
        consumer: Pubkey,
        request: &RandomWordsRequest,
        now: i64,
    ) -> Result<u64> {
        require!(
            subscription.id == request.subscription_id,
            ErrorCode::InvalidSubscription
        );
        require!(subscription.has_consumer(&consumer), ErrorCode::InvalidConsumer);
        require!(
            request.num_words >= 1 && request.num_words <= MAX_NUM_WORDS,
            ErrorCode::InvalidNumWords
        );
        require!(
            self.pending_requests.len() < MAX_PENDING_REQUESTS,
            ErrorCode::TooManyPendingRequests
        );

        let balance = subscription
            .balance
            .checked_sub(self.request_fee)
            .ok_or(ErrorCode::InsufficientBalance)?;
        let fees_collected = self
            .fees_collected
            .checked_add(self.request_fee)
            .ok_or(ErrorCode::MathOverflow)?;
        let request_id = self.next_request_id;
        let next_request_id = request_id.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        let request_count = subscription
            .request_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;

        subscription.balance = balance;
        subscription.request_count = request_count;
        self.fees_collected = fees_collected;
        self.next_request_id = next_request_id;
        self.pending_requests.push(PendingRequest {
            request_id,
            subscription_id: subscription.id,
            consumer,
            num_words: request.num_words,
            requested_at: now,
        });

        Ok(request_id)
    }

    pub fn pending(&self, request_id: u64) -> Option<&PendingRequest> {
        self.pending_requests
            .iter()
            .find(|pending| pending.request_id == request_id)
    }

    /// Removes a pending request addressed to `consumer`. A request can be
    /// taken once.
    pub fn take_request(&mut self, request_id: u64, consumer: &Pubkey) -> Result<PendingRequest> {
        let position = self
            .pending_requests
            .iter()
            .position(|pending| pending.request_id == request_id && pending.consumer == *consumer)
            .ok_or(ErrorCode::UnknownRequest)?;
        Ok(self.pending_requests.remove(position))
    }
}

impl Subscription {
    pub fn init(&mut self, bump: u8, coordinator: Pubkey, id: u64, owner: Pubkey) {
        self.bump = bump;
        self.coordinator = coordinator;
        self.id = id;
        self.owner = owner;
        self.balance = 0;
        self.request_count = 0;
        self.consumers = Vec::new();
    }

    pub fn has_consumer(&self, consumer: &Pubkey) -> bool {
        self.consumers.contains(consumer)
    }

    /// Adds a consumer. Adding one that is already registered is a no-op.
    pub fn add_consumer(&mut self, consumer: Pubkey) -> Result<()> {
        if self.has_consumer(&consumer) {
            return Ok(());
        }
        require!(
            self.consumers.len() < MAX_CONSUMERS,
            ErrorCode::TooManyConsumers
        );
        self.consumers.push(consumer);
        Ok(())
    }

    /// Credits `amount` and returns the new balance.
    pub fn fund(&mut self, amount: u64) -> Result<u64> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(self.balance)
    }
}

/// A coordinator paired with the subscription a consumer pays from.
pub struct CoordinatorHandle<'a> {
    pub coordinator: &'a mut VrfCoordinator,
    pub subscription: &'a mut Subscription,
    pub now: i64,
}

impl RandomnessOracle for CoordinatorHandle<'_> {
    fn request_random_words(
        &mut self,
        consumer: Pubkey,
        request: &RandomWordsRequest,
    ) -> Result<u64> {
        self.coordinator
            .request(self.subscription, consumer, request, self.now)
    }
}
