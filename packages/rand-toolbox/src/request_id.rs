use sha2::{Digest, Sha256};

use crate::seed::SEED_LEN;

const REQUEST_ID_DOMAIN: &[u8] = b"nois-rand/v1/request-id";
const CONTEXT_ID_DOMAIN: &[u8] = b"nois-rand/v1/context";
const TX_DOMAIN: &[u8] = b"nois-rand/v1/tx";

/// Placeholder index for executions outside of a transaction (e.g. genesis import)
const NO_TX_INDEX: u32 = u32::MAX;

/// Derives the ID of a randomness request.
///
/// The transaction hash makes the ID unknown before the admitting transaction is
/// included. The per-block sequence keeps IDs unique if the same consumer submits
/// multiple requests in one block.
pub fn request_id(
    tx_hash: &[u8; SEED_LEN],
    submit_height: u64,
    consumer: &str,
    sequence: u32,
) -> [u8; SEED_LEN] {
    let consumer_len = consumer.len() as u32;
    Sha256::new()
        .chain_update(REQUEST_ID_DOMAIN)
        .chain_update(tx_hash)
        .chain_update(submit_height.to_be_bytes())
        .chain_update(consumer_len.to_be_bytes())
        .chain_update(consumer.as_bytes())
        .chain_update(sequence.to_be_bytes())
        .finalize()
        .into()
}

/// Fingerprint of the executing transaction.
///
/// The contract environment does not expose transaction hashes, so we commit
/// to the block and the position of the transaction within it instead.
pub fn tx_fingerprint(
    chain_id: &str,
    height: u64,
    time_nanos: u64,
    tx_index: Option<u32>,
) -> [u8; SEED_LEN] {
    let chain_id_len = chain_id.len() as u32;
    Sha256::new()
        .chain_update(TX_DOMAIN)
        .chain_update(chain_id_len.to_be_bytes())
        .chain_update(chain_id.as_bytes())
        .chain_update(height.to_be_bytes())
        .chain_update(time_nanos.to_be_bytes())
        .chain_update(tx_index.unwrap_or(NO_TX_INDEX).to_be_bytes())
        .finalize()
        .into()
}

/// The handle under which the oracle collaborator serves an oracle-backed request
pub fn request_context_id(request_id: &[u8; SEED_LEN]) -> [u8; SEED_LEN] {
    Sha256::new()
        .chain_update(CONTEXT_ID_DOMAIN)
        .chain_update(request_id)
        .finalize()
        .into()
}
