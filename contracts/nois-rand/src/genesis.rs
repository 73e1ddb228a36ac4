//! Import and export of the complete module state

use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{HexBinary, StdResult, Storage};

use crate::{
    error::ContractError,
    state::{
        all_oracle_requests, all_pending_requests, all_results, has_request, has_result,
        insert_awaiting_oracle, insert_request, last_processed_height, park_oracle_request,
        save_result, set_last_processed_height, OracleRequest, Params, RandResult, RandSource,
        Request, PARAMS,
    },
};

#[cw_serde]
pub struct GenesisState {
    pub params: Params,
    /// All requests that did not produce a result yet, queued and awaiting the oracle
    pub pending_requests: Vec<Request>,
    /// The waiting set. Every entry needs a matching oracle-backed pending request.
    pub oracle_requests: Vec<OracleRequest>,
    pub results: Vec<RandResult>,
    pub last_processed_height: Option<u64>,
}

/// Writes a genesis state into empty storage
pub fn import_genesis(
    storage: &mut dyn Storage,
    genesis: GenesisState,
) -> Result<(), ContractError> {
    genesis.params.validate()?;
    PARAMS.save(storage, &genesis.params)?;

    let mut waiting = BTreeMap::<Vec<u8>, &OracleRequest>::new();
    for oracle_request in &genesis.oracle_requests {
        if waiting
            .insert(oracle_request.request_id.to_vec(), oracle_request)
            .is_some()
        {
            return Err(ContractError::invalid_genesis(format!(
                "request {} is waiting for the oracle twice",
                oracle_request.request_id.to_hex()
            )));
        }
    }

    for request in &genesis.pending_requests {
        match waiting.remove(request.id.as_slice()) {
            Some(oracle_request) => {
                check_oracle_request(request, oracle_request)?;
                insert_awaiting_oracle(storage, request)?;
                park_oracle_request(storage, oracle_request)?;
            }
            None => insert_request(storage, request)?,
        }
    }
    if let Some((request_id, _)) = waiting.into_iter().next() {
        return Err(ContractError::invalid_genesis(format!(
            "oracle request without pending request {}",
            HexBinary::from(request_id).to_hex()
        )));
    }

    for result in &genesis.results {
        if has_request(storage, result.request_id.as_slice())
            || has_result(storage, result.request_id.as_slice())
        {
            return Err(ContractError::DuplicateRequest {
                request_id: result.request_id.to_hex(),
            });
        }
        save_result(storage, result)?;
    }

    if let Some(height) = genesis.last_processed_height {
        set_last_processed_height(storage, height)?;
    }
    Ok(())
}

/// A waiting entry must agree with the request it belongs to. It matured no earlier
/// than the request's target height and has not reached its deadline yet.
fn check_oracle_request(
    request: &Request,
    oracle_request: &OracleRequest,
) -> Result<(), ContractError> {
    let RandSource::Oracle {
        request_context_id,
        deadline,
    } = &request.source
    else {
        return Err(ContractError::invalid_genesis(format!(
            "native request {} is waiting for the oracle",
            request.id.to_hex()
        )));
    };
    if *request_context_id != oracle_request.request_context_id {
        return Err(ContractError::invalid_genesis(format!(
            "request context of request {} does not match its oracle request",
            request.id.to_hex()
        )));
    }
    if *deadline != oracle_request.deadline {
        return Err(ContractError::invalid_genesis(format!(
            "deadline of request {} does not match its oracle request",
            request.id.to_hex()
        )));
    }
    if oracle_request.matured_height < request.target_height
        || oracle_request.matured_height >= oracle_request.deadline
    {
        return Err(ContractError::invalid_genesis(format!(
            "oracle request {} matured at {} outside of [{}, {})",
            request.id.to_hex(),
            oracle_request.matured_height,
            request.target_height,
            oracle_request.deadline
        )));
    }
    Ok(())
}

pub fn export_genesis(storage: &dyn Storage) -> StdResult<GenesisState> {
    Ok(GenesisState {
        params: PARAMS.load(storage)?,
        pending_requests: all_pending_requests(storage)?
            .into_iter()
            .map(|(request, _status)| request)
            .collect(),
        oracle_requests: all_oracle_requests(storage, None, usize::MAX)?,
        results: all_results(storage)?,
        last_processed_height: last_processed_height(storage)?,
    })
}
