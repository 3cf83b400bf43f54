pub use super::staking::Entity as Staking;
