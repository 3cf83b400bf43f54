pub mod staking;
pub mod token;
