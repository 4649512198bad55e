pub mod coordinator;
pub mod raffle;

pub use coordinator::*;
pub use raffle::*;
