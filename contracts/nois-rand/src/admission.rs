//! Admission of randomness requests into the height queue

use cosmwasm_std::{Addr, Env, Event, Storage};
use rand_toolbox::request_context_id;

use crate::{
    attributes::{
        ATTR_CONSUMER, ATTR_DEADLINE, ATTR_REQUEST_CONTEXT_ID, ATTR_REQUEST_ID,
        ATTR_TARGET_HEIGHT, EVENT_TYPE_ORACLE_REQUEST, EVENT_TYPE_REQUEST_RAND,
    },
    error::ContractError,
    request_id::{generate_request_id, id_bytes},
    state::{insert_request, Config, Params, RandSource, Request},
};

#[derive(Debug)]
pub struct AdmissionReceipt {
    pub request: Request,
    pub events: Vec<Event>,
}

/// Checks the block interval against the current params.
///
/// Oracle-backed requests must mature before the oracle timeout runs out, otherwise
/// they could never be answered.
pub fn validate_block_interval(
    params: &Params,
    block_interval: u64,
    oracle: bool,
) -> Result<(), ContractError> {
    let min_block_interval = params.min_block_interval.max(1);
    if block_interval < min_block_interval {
        return Err(ContractError::InvalidBlockInterval {
            block_interval,
            min_block_interval,
        });
    }
    if block_interval > params.max_block_interval {
        return Err(ContractError::BlockIntervalTooLong {
            block_interval,
            max_block_interval: params.max_block_interval,
        });
    }
    if oracle && block_interval >= params.oracle_timeout {
        return Err(ContractError::OracleTimeoutTooShort {
            block_interval,
            oracle_timeout: params.oracle_timeout,
        });
    }
    Ok(())
}

/// Validates and stores a new request maturing `block_interval` blocks after the current one
pub fn admit_request(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
    params: &Params,
    consumer: Addr,
    block_interval: u64,
    oracle: bool,
) -> Result<AdmissionReceipt, ContractError> {
    validate_block_interval(params, block_interval, oracle)?;
    if oracle && config.oracle.is_none() {
        return Err(ContractError::OracleUnavailable);
    }

    let submit_height = env.block.height;
    let target_height = submit_height.checked_add(block_interval).ok_or(
        ContractError::BlockIntervalTooLong {
            block_interval,
            max_block_interval: u64::MAX - submit_height,
        },
    )?;

    let id = generate_request_id(storage, env, &consumer)?;
    let source = if oracle {
        RandSource::Oracle {
            request_context_id: request_context_id(&id_bytes(&id)?).into(),
            deadline: submit_height.saturating_add(params.oracle_timeout),
        }
    } else {
        RandSource::Native
    };

    let request = Request {
        id,
        consumer,
        submit_height,
        target_height,
        source,
    };
    insert_request(storage, &request)?;

    let events = admission_events(&request);
    Ok(AdmissionReceipt { request, events })
}

fn admission_events(request: &Request) -> Vec<Event> {
    let mut events = vec![Event::new(EVENT_TYPE_REQUEST_RAND)
        .add_attribute(ATTR_REQUEST_ID, request.id.to_hex())
        .add_attribute(ATTR_CONSUMER, request.consumer.as_str())
        .add_attribute(ATTR_TARGET_HEIGHT, request.target_height.to_string())];
    if let RandSource::Oracle {
        request_context_id,
        deadline,
    } = &request.source
    {
        events.push(
            Event::new(EVENT_TYPE_ORACLE_REQUEST)
                .add_attribute(ATTR_REQUEST_ID, request.id.to_hex())
                .add_attribute(ATTR_REQUEST_CONTEXT_ID, request_context_id.to_hex())
                .add_attribute(ATTR_DEADLINE, deadline.to_string()),
        );
    }
    events
}
