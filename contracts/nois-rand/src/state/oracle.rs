use cosmwasm_schema::cw_serde;
use cosmwasm_std::{HexBinary, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use super::TopKey;
use crate::error::ContractError;

/// A matured oracle-backed request waiting for its callback
#[cw_serde]
pub struct OracleRequest {
    pub request_id: HexBinary,
    pub request_context_id: HexBinary,
    /// Height at which the request matured and started waiting
    pub matured_height: u64,
    /// The request fails if it is still unanswered after processing this height
    pub deadline: u64,
    /// Seed derived from the header hash at maturity.
    /// Mixed with the oracle entropy once the callback arrives.
    pub chain_seed: HexBinary,
}

/// Waiting set from request context ID to request
const ORACLE_WAITING: Map<&[u8], OracleRequest> = Map::new(TopKey::OracleWaiting.as_str());

/// Deadline index (deadline, request context ID) for the timeout sweep
const ORACLE_DEADLINES: Map<(u64, &[u8]), ()> = Map::new(TopKey::OracleDeadlines.as_str());

pub fn park_oracle_request(
    storage: &mut dyn Storage,
    request: &OracleRequest,
) -> Result<(), ContractError> {
    let context_id = request.request_context_id.as_slice();
    if ORACLE_WAITING.has(storage, context_id) {
        return Err(ContractError::invariant_violation(format!(
            "request context {} is waiting already",
            request.request_context_id.to_hex()
        )));
    }
    ORACLE_WAITING.save(storage, context_id, request)?;
    ORACLE_DEADLINES.save(storage, (request.deadline, context_id), &())?;
    Ok(())
}

pub fn may_load_oracle_request(
    storage: &dyn Storage,
    request_context_id: &[u8],
) -> StdResult<Option<OracleRequest>> {
    ORACLE_WAITING.may_load(storage, request_context_id)
}

/// Removes a request from the waiting set
pub fn take_oracle_request(
    storage: &mut dyn Storage,
    request_context_id: &[u8],
) -> Result<OracleRequest, ContractError> {
    let Some(request) = ORACLE_WAITING.may_load(storage, request_context_id)? else {
        return Err(ContractError::UnknownRequestContext {
            request_context_id: HexBinary::from(request_context_id).to_hex(),
        });
    };
    ORACLE_WAITING.remove(storage, request_context_id);
    ORACLE_DEADLINES.remove(storage, (request.deadline, request_context_id));
    Ok(request)
}

/// Waiting requests with a deadline at or below `height`, ordered by deadline
/// and request context ID. Does not remove anything.
pub fn expired_oracle_requests(
    storage: &dyn Storage,
    height: u64,
) -> Result<Vec<OracleRequest>, ContractError> {
    let mut out = Vec::<OracleRequest>::new();
    for key in ORACLE_DEADLINES.keys(storage, None, None, Order::Ascending) {
        let (deadline, context_id) = key?;
        if deadline > height {
            break;
        }
        let request = ORACLE_WAITING
            .may_load(storage, &context_id)?
            .ok_or_else(|| {
                ContractError::invariant_violation(format!(
                    "deadline entry points to missing request context {}",
                    HexBinary::from(context_id.clone()).to_hex()
                ))
            })?;
        out.push(request);
    }
    Ok(out)
}

/// Lists the waiting set ordered by request context ID
pub fn all_oracle_requests(
    storage: &dyn Storage,
    start_after: Option<&[u8]>,
    limit: usize,
) -> StdResult<Vec<OracleRequest>> {
    ORACLE_WAITING
        .range(
            storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .map(|item| item.map(|(_, request)| request))
        .collect()
}
