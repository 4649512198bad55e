use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Round errors
    #[msg("Paid amount is below the entrance fee")]
    InsufficientPayment,
    #[msg("Raffle is not open for entries")]
    RoundNotOpen,
    #[msg("Upkeep not needed")]
    NotEligible,
    #[msg("Request id does not match a pending request")]
    UnknownRequest,
    #[msg("Payout transfer failed")]
    TransferFailed,
    #[msg("Caller is not the registered randomness oracle")]
    UnauthorizedCaller,
    #[msg("Player index out of range")]
    IndexOutOfRange,
    #[msg("Raffle has reached its player capacity")]
    RaffleFull,
    #[msg("No players in the current round")]
    NoPlayers,
    #[msg("Fulfillment carried no random words")]
    MissingRandomWords,
    #[msg("Invalid raffle configuration")]
    InvalidConfig,
    #[msg("Arithmetic overflow")]
    MathOverflow,

    // Coordinator errors
    #[msg("Subscription does not match the request")]
    InvalidSubscription,
    #[msg("Consumer is not registered on the subscription")]
    InvalidConsumer,
    #[msg("Subscription has too many consumers")]
    TooManyConsumers,
    #[msg("Subscription balance too low for the request fee")]
    InsufficientBalance,
    #[msg("Coordinator has too many pending requests")]
    TooManyPendingRequests,
    #[msg("Requested word count is out of range")]
    InvalidNumWords,
    #[msg("Signer does not own the subscription")]
    NotSubscriptionOwner,
    #[msg("Invalid randomness account data")]
    InvalidRandomnessAccount,
    #[msg("Randomness not yet resolved")]
    RandomnessNotResolved,
    #[msg("A randomness account is already committed to this draw")]
    RandomnessAlreadyCommitted,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness account does not match the committed one")]
    IncorrectRandomnessAccount,
}
