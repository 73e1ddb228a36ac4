//! Block-driven maturity processing.
//!
//! Called exactly once per block by the chain. Drains the queue bucket of the current
//! height, plus any bucket left behind by skipped heights, and sweeps expired oracle
//! requests afterwards.

use cosmwasm_std::{Event, HexBinary, Storage};
use rand_toolbox::{native_seed, random_decimal, SEED_LEN};

use crate::{
    error::ContractError,
    oracle_bridge::{self, generate_rand_event},
    request_id::id_bytes,
    state::{
        due_requests, last_processed_height, overdue_heights, prune_queue_height,
        remove_request, save_result, set_last_processed_height, Params, RandResult, RandSource,
        Request,
    },
};

#[derive(Debug, Default)]
pub struct BlockReceipt {
    pub events: Vec<Event>,
    /// Native requests finalized in this block
    pub requests_processed: u32,
    /// Oracle-backed requests that matured and now wait for the callback
    pub oracle_parked: u32,
    /// Oracle-backed requests that failed in this block
    pub oracle_expired: u32,
}

pub fn process_block(
    storage: &mut dyn Storage,
    height: u64,
    header_hash: &HexBinary,
    params: &Params,
) -> Result<BlockReceipt, ContractError> {
    let header_hash = <[u8; SEED_LEN]>::try_from(header_hash.as_slice()).map_err(|_| {
        ContractError::InvalidHeaderHash {
            len: header_hash.len(),
        }
    })?;
    if let Some(last_processed) = last_processed_height(storage)? {
        if height <= last_processed {
            return Err(ContractError::HeightAlreadyProcessed {
                height,
                last_processed,
            });
        }
    }

    let mut receipt = BlockReceipt::default();

    // Buckets of heights that were never processed are served with the current
    // header hash. Their results carry the current height.
    let mut heights = overdue_heights(storage, height)?;
    heights.push(height);
    for bucket in heights {
        for request in due_requests(storage, bucket)? {
            let seed = native_seed(&header_hash, &id_bytes(&request.id)?);
            match request.source {
                RandSource::Native => {
                    let event = finalize_native(storage, request, height, seed, params.rand_prec)?;
                    receipt.events.push(event);
                    receipt.requests_processed += 1;
                }
                RandSource::Oracle { .. } => {
                    oracle_bridge::park(storage, &request, height, seed)?;
                    receipt.oracle_parked += 1;
                }
            }
        }
        prune_queue_height(storage, bucket);
    }

    let expired = oracle_bridge::expire(storage, height)?;
    receipt.oracle_expired = expired.len() as u32;
    receipt.events.extend(expired);

    set_last_processed_height(storage, height)?;
    Ok(receipt)
}

fn finalize_native(
    storage: &mut dyn Storage,
    request: Request,
    height: u64,
    seed: [u8; SEED_LEN],
    rand_prec: u32,
) -> Result<Event, ContractError> {
    let result = RandResult {
        request_id: request.id,
        consumer: request.consumer,
        request_context_id: None,
        height,
        value: random_decimal(&seed, rand_prec),
        seed_source: seed.into(),
    };
    save_result(storage, &result)?;
    remove_request(storage, result.request_id.as_slice())?;
    Ok(generate_rand_event(&result))
}
