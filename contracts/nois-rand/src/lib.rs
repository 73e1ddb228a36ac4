pub mod admission;
pub mod attributes;
pub mod contract;
pub mod error;
pub mod genesis;
pub mod maturity;
pub mod msg;
pub mod oracle_bridge;
pub mod request_id;
pub mod state;

pub use crate::error::ContractError;
pub use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, SudoMsg};
