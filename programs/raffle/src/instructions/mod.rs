pub mod admin;
pub mod check_upkeep;
pub mod commit_randomness;
pub mod coordinator;
pub mod enter_raffle;
pub mod fulfill_random_words;
pub mod perform_upkeep;

pub use admin::*;
pub use check_upkeep::*;
pub use commit_randomness::*;
pub use coordinator::*;
pub use enter_raffle::*;
pub use fulfill_random_words::*;
pub use perform_upkeep::*;
