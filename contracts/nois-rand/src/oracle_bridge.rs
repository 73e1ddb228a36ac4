//! Hand-off between matured oracle-backed requests and the external oracle.
//!
//! A request moves into the waiting set when it matures. From there it leaves either
//! through a callback carrying the oracle entropy or through the timeout sweep.

use cosmwasm_std::{Event, HexBinary, Storage};
use rand_toolbox::{oracle_seed, random_decimal, SEED_LEN};

use crate::{
    attributes::{
        ATTR_CONSUMER, ATTR_DEADLINE, ATTR_RAND, ATTR_RAND_HEIGHT, ATTR_REQUEST_CONTEXT_ID,
        ATTR_REQUEST_ID, EVENT_TYPE_GENERATE_RAND, EVENT_TYPE_ORACLE_TIMEOUT,
    },
    error::ContractError,
    state::{
        dequeue_for_oracle, expired_oracle_requests, park_oracle_request, remove_request,
        save_result, take_oracle_request, OracleRequest, RandResult, RandSource, Request,
    },
};

/// Upper bound for the entropy delivered in a single callback
pub const MAX_ENTROPY_LEN: usize = 1024;

/// Moves a matured oracle-backed request from the height queue into the waiting set
pub fn park(
    storage: &mut dyn Storage,
    request: &Request,
    matured_height: u64,
    chain_seed: [u8; SEED_LEN],
) -> Result<(), ContractError> {
    let RandSource::Oracle {
        request_context_id,
        deadline,
    } = &request.source
    else {
        return Err(ContractError::invariant_violation(format!(
            "native request {} cannot wait for the oracle",
            request.id.to_hex()
        )));
    };
    dequeue_for_oracle(storage, request.id.as_slice())?;
    park_oracle_request(
        storage,
        &OracleRequest {
            request_id: request.id.clone(),
            request_context_id: request_context_id.clone(),
            matured_height,
            deadline: *deadline,
            chain_seed: chain_seed.into(),
        },
    )
}

/// Finalizes a waiting request with the entropy delivered by the oracle.
///
/// Only requests in the waiting set can be resolved. Unknown, expired and already
/// answered contexts all fail with [`ContractError::UnknownRequestContext`].
pub fn resolve(
    storage: &mut dyn Storage,
    request_context_id: &HexBinary,
    entropy: &HexBinary,
    height: u64,
    rand_prec: u32,
) -> Result<(RandResult, Event), ContractError> {
    if entropy.is_empty() || entropy.len() > MAX_ENTROPY_LEN {
        return Err(ContractError::InvalidEntropy {
            len: entropy.len(),
            max_len: MAX_ENTROPY_LEN,
        });
    }

    let waiting = take_oracle_request(storage, request_context_id.as_slice())?;
    let chain_seed = <[u8; SEED_LEN]>::try_from(waiting.chain_seed.as_slice()).map_err(|_| {
        ContractError::invariant_violation(format!(
            "malformed chain seed for request context {}",
            request_context_id.to_hex()
        ))
    })?;
    let request = remove_request(storage, waiting.request_id.as_slice()).map_err(|_| {
        ContractError::invariant_violation(format!(
            "request context {} points to missing request {}",
            request_context_id.to_hex(),
            waiting.request_id.to_hex()
        ))
    })?;

    let seed = oracle_seed(&chain_seed, entropy.as_slice());
    let result = RandResult {
        request_id: request.id,
        consumer: request.consumer,
        request_context_id: Some(request_context_id.clone()),
        height,
        value: random_decimal(&seed, rand_prec),
        seed_source: seed.into(),
    };
    save_result(storage, &result)?;

    let event = generate_rand_event(&result);
    Ok((result, event))
}

/// Fails all waiting requests whose deadline is at or below `height`
pub fn expire(storage: &mut dyn Storage, height: u64) -> Result<Vec<Event>, ContractError> {
    let mut events = Vec::<Event>::new();
    for expired in expired_oracle_requests(storage, height)? {
        take_oracle_request(storage, expired.request_context_id.as_slice())?;
        let request = remove_request(storage, expired.request_id.as_slice())?;
        events.push(
            Event::new(EVENT_TYPE_ORACLE_TIMEOUT)
                .add_attribute(ATTR_REQUEST_ID, request.id.to_hex())
                .add_attribute(ATTR_REQUEST_CONTEXT_ID, expired.request_context_id.to_hex())
                .add_attribute(ATTR_CONSUMER, request.consumer.as_str())
                .add_attribute(ATTR_DEADLINE, expired.deadline.to_string()),
        );
    }
    Ok(events)
}

/// The event emitted for every produced randomness, native or oracle-backed
pub fn generate_rand_event(result: &RandResult) -> Event {
    let mut event = Event::new(EVENT_TYPE_GENERATE_RAND)
        .add_attribute(ATTR_REQUEST_ID, result.request_id.to_hex())
        .add_attribute(ATTR_CONSUMER, result.consumer.as_str())
        .add_attribute(ATTR_RAND_HEIGHT, result.height.to_string())
        .add_attribute(ATTR_RAND, result.value.to_string());
    if let Some(request_context_id) = &result.request_context_id {
        event = event.add_attribute(ATTR_REQUEST_CONTEXT_ID, request_context_id.to_hex());
    }
    event
}
