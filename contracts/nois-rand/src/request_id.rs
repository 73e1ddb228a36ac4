use cosmwasm_std::{Addr, Env, HexBinary, StdResult, Storage};
use rand_toolbox::{request_id, tx_fingerprint, SEED_LEN};

use crate::error::ContractError;
use crate::state::{has_request, has_result, next_admission_sequence};

/// Derives the ID for a request admitted in the current execution.
///
/// Consumes one per-block sequence number.
pub fn generate_request_id(
    storage: &mut dyn Storage,
    env: &Env,
    consumer: &Addr,
) -> StdResult<HexBinary> {
    let height = env.block.height;
    let sequence = next_admission_sequence(storage, height)?;
    let tx_hash = tx_fingerprint(
        &env.block.chain_id,
        height,
        env.block.time.nanos(),
        env.transaction.as_ref().map(|tx| tx.index),
    );
    Ok(request_id(&tx_hash, height, consumer.as_str(), sequence).into())
}

/// Parses a hex encoded request ID and checks its length
pub fn parse_request_id(input: &str) -> Result<HexBinary, ContractError> {
    let id = HexBinary::from_hex(input).map_err(|_| ContractError::InvalidRequestId {
        reason: "not valid hex".to_string(),
    })?;
    if id.len() != SEED_LEN {
        return Err(ContractError::InvalidRequestId {
            reason: format!("expected {SEED_LEN} bytes, got {}", id.len()),
        });
    }
    Ok(id)
}

/// Like [`parse_request_id`] but also requires the request to be known, either
/// as pending request or as produced result.
pub fn check_request_id(storage: &dyn Storage, input: &str) -> Result<HexBinary, ContractError> {
    let id = parse_request_id(input)?;
    if has_request(storage, id.as_slice()) || has_result(storage, id.as_slice()) {
        Ok(id)
    } else {
        Err(ContractError::RequestNotFound {
            request_id: id.to_hex(),
        })
    }
}

/// Converts a stored ID into the fixed size engine input
pub fn id_bytes(id: &HexBinary) -> Result<[u8; SEED_LEN], ContractError> {
    <[u8; SEED_LEN]>::try_from(id.as_slice()).map_err(|_| {
        ContractError::invariant_violation(format!("malformed stored ID {}", id.to_hex()))
    })
}
