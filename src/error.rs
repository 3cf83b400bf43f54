//! Error types shared by the chain reader, the staking store and start-up code.

use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum StakingError {
    /// RPC endpoint unreachable, contract reverted, or the response did not decode.
    #[error("Contract call error ({context}): {message}")]
    ChainCall { context: String, message: String },

    #[error("Database error: {0}")]
    Store(#[from] DbErr),

    #[error("Invalid config: {0}")]
    Config(String),
}

impl StakingError {
    pub fn chain_call(context: impl Into<String>, message: impl ToString) -> Self {
        StakingError::ChainCall {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
