use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use rand_toolbox::MAX_RAND_PREC;

use super::TopKey;
use crate::error::ContractError;

#[cw_serde]
pub struct Config {
    /// Manager to rotate the manager and oracle addresses
    pub manager: Addr,
    /// The only address allowed to answer oracle-backed requests.
    /// As long as this is unset, oracle-backed requests are rejected.
    pub oracle: Option<Addr>,
}

pub const CONFIG: Item<Config> = Item::new(TopKey::Config.as_str());

/// Bounds owned by governance. Updated via sudo only.
#[cw_serde]
pub struct Params {
    /// The lowest accepted number of blocks between submission and maturity. At least 1.
    pub min_block_interval: u64,
    /// The highest accepted number of blocks between submission and maturity
    pub max_block_interval: u64,
    /// Number of blocks after submission within which the oracle must answer
    pub oracle_timeout: u64,
    /// Decimal places of the produced randomness
    pub rand_prec: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_block_interval: 1,
            max_block_interval: 100,
            oracle_timeout: 50,
            rand_prec: MAX_RAND_PREC,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.min_block_interval == 0 {
            return Err(ContractError::invalid_params(
                "min_block_interval must be at least 1",
            ));
        }
        if self.max_block_interval < self.min_block_interval {
            return Err(ContractError::invalid_params(
                "max_block_interval must not be lower than min_block_interval",
            ));
        }
        // Otherwise no oracle request could ever be admitted
        if self.oracle_timeout <= self.min_block_interval {
            return Err(ContractError::invalid_params(
                "oracle_timeout must be greater than min_block_interval",
            ));
        }
        if self.rand_prec == 0 || self.rand_prec > MAX_RAND_PREC {
            return Err(ContractError::invalid_params(format!(
                "rand_prec must be in range 1..={MAX_RAND_PREC}"
            )));
        }
        Ok(())
    }
}

pub const PARAMS: Item<Params> = Item::new(TopKey::Params.as_str());
