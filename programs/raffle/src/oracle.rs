use anchor_lang::prelude::*;
use solana_program::keccak::hashv;

/// Tuning values a consumer forwards with every randomness request.
/// They are opaque to the raffle and only interpreted by the oracle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RandomWordsRequest {
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
}

/// A source of verifiable randomness with asynchronous delivery.
///
/// `request_random_words` only registers the request and hands back its id.
/// The random words arrive later through the consumer's fulfillment
/// instruction, echoing that id, at most once and possibly never.
pub trait RandomnessOracle {
    fn request_random_words(
        &mut self,
        consumer: Pubkey,
        request: &RandomWordsRequest,
    ) -> Result<u64>;
}

/// Expands a 32-byte seed into `num_words` words:
/// `word[i] = u64_le(keccak256(seed || i_le)[..8])`.
pub fn expand_seed(seed: &[u8], num_words: u32) -> Vec<u64> {
    (0..num_words)
        .map(|i| {
            let digest = hashv(&[seed, &i.to_le_bytes()]).0;
            let mut word = [0u8; 8];
            word.copy_from_slice(&digest[..8]);
            u64::from_le_bytes(word)
        })
        .collect()
}

/// Words a coordinator delivers when the fulfiller doesn't override them.
pub fn derive_random_words(request_id: u64, num_words: u32) -> Vec<u64> {
    expand_seed(&request_id.to_le_bytes(), num_words)
}
