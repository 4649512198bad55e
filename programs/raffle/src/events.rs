use anchor_lang::prelude::*;

#[event]
pub struct RaffleInitialized {
    pub raffle: Pubkey,
    pub vrf_coordinator: Pubkey,
    pub entrance_fee: u64,
    pub interval: i64,
    pub timestamp: i64,
}

#[event]
pub struct RaffleEntered {
    pub raffle: Pubkey,
    pub player: Pubkey,
    pub amount: u64,
    pub players: u64,
}

#[event]
pub struct DrawRequested {
    pub raffle: Pubkey,
    pub request_id: u64,
    pub round: u64,
    pub timestamp: i64,
}

#[event]
pub struct RandomnessCommitted {
    pub raffle: Pubkey,
    pub request_id: u64,
    pub randomness_account: Pubkey,
}

#[event]
pub struct WinnerPicked {
    pub raffle: Pubkey,
    pub winner: Pubkey,
    pub prize: u64,
    pub round: u64,
    pub timestamp: i64,
}

#[event]
pub struct CoordinatorInitialized {
    pub coordinator: Pubkey,
    pub authority: Pubkey,
    pub request_fee: u64,
}

#[event]
pub struct SubscriptionCreated {
    pub coordinator: Pubkey,
    pub subscription_id: u64,
    pub owner: Pubkey,
}

#[event]
pub struct SubscriptionFunded {
    pub subscription_id: u64,
    pub old_balance: u64,
    pub new_balance: u64,
}

#[event]
pub struct ConsumerAdded {
    pub subscription_id: u64,
    pub consumer: Pubkey,
}

#[event]
pub struct RandomWordsRequested {
    pub coordinator: Pubkey,
    pub request_id: u64,
    pub subscription_id: u64,
    pub consumer: Pubkey,
    pub num_words: u32,
}

#[event]
pub struct RandomWordsFulfilled {
    pub coordinator: Pubkey,
    pub request_id: u64,
    pub consumer: Pubkey,
}
