use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use super::TopKey;
use crate::error::ContractError;

/// Where the entropy of a request comes from
#[cw_serde]
pub enum RandSource {
    /// Seeded by the header hash of the block in which the request matures
    Native,
    /// Seeded by the header hash at maturity and the entropy delivered by the oracle
    Oracle {
        /// The handle under which the oracle serves this request
        request_context_id: HexBinary,
        /// The request fails if it is still unanswered after processing this height
        deadline: u64,
    },
}

#[cw_serde]
pub struct Request {
    pub id: HexBinary,
    pub consumer: Addr,
    /// Height of the block in which the request was admitted
    pub submit_height: u64,
    /// Height of the block in which the request matures
    pub target_height: u64,
    pub source: RandSource,
}

impl Request {
    pub fn request_context_id(&self) -> Option<&HexBinary> {
        match &self.source {
            RandSource::Native => None,
            RandSource::Oracle {
                request_context_id, ..
            } => Some(request_context_id),
        }
    }
}

#[cw_serde]
pub enum RequestStatus {
    /// Waiting in the height queue for its target height
    Queued,
    /// Matured and waiting for the oracle callback
    AwaitingOracle,
}

#[cw_serde]
struct StoredRequest {
    request: Request,
    /// Position in the queue bucket of the target height.
    /// None once the request left the queue.
    queue_pos: Option<u32>,
}

impl StoredRequest {
    fn status(&self) -> RequestStatus {
        match self.queue_pos {
            Some(_) => RequestStatus::Queued,
            None => RequestStatus::AwaitingOracle,
        }
    }
}

/// Primary index from request ID to request
const REQUESTS: Map<&[u8], StoredRequest> = Map::new(TopKey::Requests.as_str());

/// A map from (target height, position) to request ID where the position is
/// a height specific auto incrementing ID. This keeps insertion order within a bucket.
const QUEUE: Map<(u64, u32), HexBinary> = Map::new(TopKey::Queue.as_str());

/// The last position handed out per target height
const QUEUE_LAST_POS: Map<u64, u32> = Map::new(TopKey::QueueLastPos.as_str());

fn not_found(id: &[u8]) -> ContractError {
    ContractError::RequestNotFound {
        request_id: HexBinary::from(id).to_hex(),
    }
}

fn enqueue(storage: &mut dyn Storage, height: u64, id: &HexBinary) -> StdResult<u32> {
    let pos = QUEUE_LAST_POS
        .may_load(storage, height)?
        .map_or(0, |last| last + 1);
    QUEUE.save(storage, (height, pos), id)?;
    QUEUE_LAST_POS.save(storage, height, &pos)?;
    Ok(pos)
}

/// Adds a request to the primary index and to the queue bucket of its target height
pub fn insert_request(storage: &mut dyn Storage, request: &Request) -> Result<(), ContractError> {
    if REQUESTS.has(storage, request.id.as_slice()) {
        return Err(ContractError::DuplicateRequest {
            request_id: request.id.to_hex(),
        });
    }
    let queue_pos = enqueue(storage, request.target_height, &request.id)?;
    REQUESTS.save(
        storage,
        request.id.as_slice(),
        &StoredRequest {
            request: request.clone(),
            queue_pos: Some(queue_pos),
        },
    )?;
    Ok(())
}

/// Adds a matured oracle-backed request without queueing it.
/// Used when importing state.
pub fn insert_awaiting_oracle(
    storage: &mut dyn Storage,
    request: &Request,
) -> Result<(), ContractError> {
    if request.request_context_id().is_none() {
        return Err(ContractError::invariant_violation(format!(
            "native request {} cannot wait for the oracle",
            request.id.to_hex()
        )));
    }
    if REQUESTS.has(storage, request.id.as_slice()) {
        return Err(ContractError::DuplicateRequest {
            request_id: request.id.to_hex(),
        });
    }
    REQUESTS.save(
        storage,
        request.id.as_slice(),
        &StoredRequest {
            request: request.clone(),
            queue_pos: None,
        },
    )?;
    Ok(())
}

pub fn has_request(storage: &dyn Storage, id: &[u8]) -> bool {
    REQUESTS.has(storage, id)
}

pub fn get_request(storage: &dyn Storage, id: &[u8]) -> Result<Request, ContractError> {
    match REQUESTS.may_load(storage, id)? {
        Some(stored) => Ok(stored.request),
        None => Err(not_found(id)),
    }
}

pub fn may_get_request(
    storage: &dyn Storage,
    id: &[u8],
) -> StdResult<Option<(Request, RequestStatus)>> {
    let stored = REQUESTS.may_load(storage, id)?;
    Ok(stored.map(|s| {
        let status = s.status();
        (s.request, status)
    }))
}

/// Removes a request from both indices
pub fn remove_request(storage: &mut dyn Storage, id: &[u8]) -> Result<Request, ContractError> {
    let stored = REQUESTS.may_load(storage, id)?.ok_or_else(|| not_found(id))?;
    if let Some(pos) = stored.queue_pos {
        QUEUE.remove(storage, (stored.request.target_height, pos));
    }
    REQUESTS.remove(storage, id);
    Ok(stored.request)
}

/// Takes a request out of the height queue but keeps it in the primary index
/// such that it can still be found by ID while waiting for the oracle.
pub fn dequeue_for_oracle(storage: &mut dyn Storage, id: &[u8]) -> Result<Request, ContractError> {
    let mut stored = REQUESTS.may_load(storage, id)?.ok_or_else(|| not_found(id))?;
    let Some(pos) = stored.queue_pos else {
        return Err(ContractError::invariant_violation(format!(
            "request {} is not queued",
            stored.request.id.to_hex()
        )));
    };
    if stored.request.request_context_id().is_none() {
        return Err(ContractError::invariant_violation(format!(
            "native request {} cannot wait for the oracle",
            stored.request.id.to_hex()
        )));
    }
    QUEUE.remove(storage, (stored.request.target_height, pos));
    stored.queue_pos = None;
    REQUESTS.save(storage, id, &stored)?;
    Ok(stored.request)
}

/// Returns, and does not remove, the requests maturing at this height in insertion order.
///
/// A queue entry without a matching request means the indices disagree, which is
/// reported as an invariant violation.
pub fn due_requests(storage: &dyn Storage, height: u64) -> Result<Vec<Request>, ContractError> {
    let entries = QUEUE
        .prefix(height)
        .range(storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;

    let mut out = Vec::with_capacity(entries.len());
    for (pos, id) in entries {
        let stored = REQUESTS.may_load(storage, id.as_slice())?.ok_or_else(|| {
            ContractError::invariant_violation(format!(
                "queue entry ({height}, {pos}) points to missing request {}",
                id.to_hex()
            ))
        })?;
        if stored.queue_pos != Some(pos) || stored.request.target_height != height {
            return Err(ContractError::invariant_violation(format!(
                "queue entry ({height}, {pos}) does not match request {}",
                id.to_hex()
            )));
        }
        out.push(stored.request);
    }
    Ok(out)
}

/// Forgets the position counter of a drained height. No request can be admitted
/// for a height that was processed already.
pub fn prune_queue_height(storage: &mut dyn Storage, height: u64) {
    QUEUE_LAST_POS.remove(storage, height);
}

/// Heights lower than `below` that still have queued requests, in ascending order
pub fn overdue_heights(storage: &dyn Storage, below: u64) -> StdResult<Vec<u64>> {
    let mut heights = Vec::<u64>::new();
    for key in QUEUE.keys(
        storage,
        None,
        Some(Bound::exclusive((below, 0u32))),
        Order::Ascending,
    ) {
        let (height, _pos) = key?;
        if heights.last() != Some(&height) {
            heights.push(height);
        }
    }
    Ok(heights)
}

/// Lists queued requests in processing order, optionally limited to an
/// inclusive range of target heights.
pub fn queued_requests(
    storage: &dyn Storage,
    min_height: Option<u64>,
    max_height: Option<u64>,
    offset: usize,
    limit: usize,
) -> StdResult<Vec<Request>> {
    let low = min_height.map(|h| Bound::inclusive((h, 0u32)));
    let high = max_height.map(|h| Bound::inclusive((h, u32::MAX)));
    QUEUE
        .range(storage, low, high, Order::Ascending)
        .skip(offset)
        .take(limit)
        .map(|item| {
            let (_, id) = item?;
            Ok(REQUESTS.load(storage, id.as_slice())?.request)
        })
        .collect()
}

/// All requests in the store. Queued requests come first in processing order,
/// followed by the requests awaiting the oracle ordered by ID.
pub fn all_pending_requests(storage: &dyn Storage) -> StdResult<Vec<(Request, RequestStatus)>> {
    let mut out: Vec<(Request, RequestStatus)> =
        queued_requests(storage, None, None, 0, usize::MAX)?
            .into_iter()
            .map(|request| (request, RequestStatus::Queued))
            .collect();
    for item in REQUESTS.range(storage, None, None, Order::Ascending) {
        let (_, stored) = item?;
        if stored.queue_pos.is_none() {
            out.push((stored.request, RequestStatus::AwaitingOracle));
        }
    }
    Ok(out)
}
