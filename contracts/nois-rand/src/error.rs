use thiserror::Error;

use cosmwasm_std::StdError;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized.")]
    Unauthorized,

    // Admission
    #[error("Block interval {block_interval} lower than min block interval {min_block_interval}")]
    InvalidBlockInterval {
        block_interval: u64,
        min_block_interval: u64,
    },

    #[error("Block interval {block_interval} exceeds max block interval {max_block_interval}")]
    BlockIntervalTooLong {
        block_interval: u64,
        max_block_interval: u64,
    },

    #[error("Oracle requests are disabled as long as no oracle is set")]
    OracleUnavailable,

    #[error("Block interval {block_interval} of an oracle request must be lower than the oracle timeout {oracle_timeout}")]
    OracleTimeoutTooShort {
        block_interval: u64,
        oracle_timeout: u64,
    },

    #[error("A request with ID {request_id} exists already")]
    DuplicateRequest { request_id: String },

    // Lookups
    #[error("Invalid request ID: {reason}")]
    InvalidRequestId { reason: String },

    #[error("Request {request_id} not found")]
    RequestNotFound { request_id: String },

    #[error("No pending oracle request for request context {request_context_id}")]
    UnknownRequestContext { request_context_id: String },

    #[error("Oracle entropy must be between 1 and {max_len} bytes long but has {len} bytes")]
    InvalidEntropy { len: usize, max_len: usize },

    // Block processing
    #[error("Header hash must be 32 bytes long but has {len} bytes")]
    InvalidHeaderHash { len: usize },

    #[error("Height {height} was processed already. Last processed height: {last_processed}")]
    HeightAlreadyProcessed { height: u64, last_processed: u64 },

    #[error("Invariant violation: {msg}")]
    InvariantViolation { msg: String },

    // Params
    #[error("Invalid params: {msg}")]
    InvalidParams { msg: String },

    #[error("Invalid genesis state: {msg}")]
    InvalidGenesis { msg: String },
}

impl ContractError {
    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::InvariantViolation { msg: msg.into() }
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams { msg: msg.into() }
    }

    pub fn invalid_genesis(msg: impl Into<String>) -> Self {
        Self::InvalidGenesis { msg: msg.into() }
    }
}
