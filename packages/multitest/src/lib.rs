// Testing utils. See tests folder for actual tests.

use cosmwasm_std::{Addr, Attribute, Event, HexBinary};
use cw_multi_test::{App, AppResponse, ContractWrapper};

/// Gets the value of the first attribute with the given key
pub fn first_attr(data: impl AsRef<[Attribute]>, search_key: &str) -> Option<String> {
    data.as_ref().iter().find_map(|a| {
        if a.key == search_key {
            Some(a.value.clone())
        } else {
            None
        }
    })
}

/// Gets all events of the given type emitted by contracts.
/// Custom contract events are prefixed with "wasm-" by the chain.
pub fn wasm_events<'a>(events: &'a [Event], ty: &str) -> Vec<&'a Event> {
    let full_type = format!("wasm-{ty}");
    events.iter().filter(|e| e.ty == full_type).collect()
}

/// A fake but deterministic header hash for the given height
pub fn header_hash(height: u64) -> HexBinary {
    let mut hash = [0xC3; 32];
    hash[24..].copy_from_slice(&height.to_be_bytes());
    HexBinary::from(hash)
}

pub fn store_nois_rand(app: &mut App) -> u64 {
    let code = ContractWrapper::new(
        nois_rand::contract::execute,
        nois_rand::contract::instantiate,
        nois_rand::contract::query,
    )
    .with_sudo(nois_rand::contract::sudo);
    app.store_code(Box::new(code))
}

/// Moves the chain to `height` and runs the end blocker there
pub fn end_block(app: &mut App, contract: &Addr, height: u64) -> AppResponse {
    app.update_block(|block| block.height = height);
    app.wasm_sudo(
        contract.clone(),
        &nois_rand::SudoMsg::EndBlock {
            header_hash: header_hash(height),
        },
    )
    .unwrap()
}

/// Moves the chain to `height` without running the end blocker
pub fn set_height(app: &mut App, height: u64) {
    app.update_block(|block| block.height = height);
}
