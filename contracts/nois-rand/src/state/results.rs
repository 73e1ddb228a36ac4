use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, HexBinary, Order, StdResult, Storage};
use cw_storage_plus::Map;

use super::TopKey;
use crate::error::ContractError;

/// Produced randomness. Immutable once stored.
#[cw_serde]
pub struct RandResult {
    pub request_id: HexBinary,
    pub consumer: Addr,
    /// Set for oracle-backed requests
    pub request_context_id: Option<HexBinary>,
    /// Height of the block in which the randomness was produced
    pub height: u64,
    /// A value in [0, 1) with `rand_prec` decimal places
    pub value: Decimal,
    /// The seed the value was derived from, kept for audits
    pub seed_source: HexBinary,
}

const RESULTS: Map<&[u8], RandResult> = Map::new(TopKey::Results.as_str());

/// Stores a result. Every request produces at most one result, so an existing
/// entry means a request was processed twice.
pub fn save_result(storage: &mut dyn Storage, result: &RandResult) -> Result<(), ContractError> {
    if RESULTS.has(storage, result.request_id.as_slice()) {
        return Err(ContractError::invariant_violation(format!(
            "result for request {} exists already",
            result.request_id.to_hex()
        )));
    }
    RESULTS.save(storage, result.request_id.as_slice(), result)?;
    Ok(())
}

pub fn may_load_result(storage: &dyn Storage, request_id: &[u8]) -> StdResult<Option<RandResult>> {
    RESULTS.may_load(storage, request_id)
}

pub fn has_result(storage: &dyn Storage, request_id: &[u8]) -> bool {
    RESULTS.has(storage, request_id)
}

/// All results ordered by request ID
pub fn all_results(storage: &dyn Storage) -> StdResult<Vec<RandResult>> {
    RESULTS
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, result)| result))
        .collect()
}
