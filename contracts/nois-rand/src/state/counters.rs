use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Item;

use super::TopKey;

/// The last (height, sequence) pair handed out during admission.
/// Only the current block matters, so this is a single item instead of a map.
const ADMISSION_SEQUENCE: Item<(u64, u32)> = Item::new(TopKey::AdmissionSequence.as_str());

const LAST_PROCESSED_HEIGHT: Item<u64> = Item::new(TopKey::LastProcessedHeight.as_str());

/// Returns the next per-block sequence number, starting at 0 in every block
pub fn next_admission_sequence(storage: &mut dyn Storage, height: u64) -> StdResult<u32> {
    let sequence = match ADMISSION_SEQUENCE.may_load(storage)? {
        Some((last_height, last)) if last_height == height => last + 1,
        _ => 0,
    };
    ADMISSION_SEQUENCE.save(storage, &(height, sequence))?;
    Ok(sequence)
}

pub fn last_processed_height(storage: &dyn Storage) -> StdResult<Option<u64>> {
    LAST_PROCESSED_HEIGHT.may_load(storage)
}

pub fn set_last_processed_height(storage: &mut dyn Storage, height: u64) -> StdResult<()> {
    LAST_PROCESSED_HEIGHT.save(storage, &height)
}
