#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure_eq, to_json_binary, Deps, DepsMut, Empty, Env, HexBinary, MessageInfo, QueryResponse,
    Response, StdError, StdResult,
};

use crate::admission::{admit_request, AdmissionReceipt};
use crate::attributes::{
    ATTR_ACTION, ATTR_ORACLE_EXPIRED, ATTR_ORACLE_PARKED, ATTR_REQUESTS_PROCESSED,
    ATTR_REQUEST_ID,
};
use crate::error::ContractError;
use crate::genesis::{export_genesis, import_genesis, GenesisState};
use crate::maturity::{process_block, BlockReceipt};
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, OracleRequestsResponse, ParamsResponse,
    PendingRequest, QueryMsg, RandRequestQueueResponse, RandResponse, RequestRandResponse,
    RequestResponse, SudoMsg,
};
use crate::oracle_bridge;
use crate::request_id::{check_request_id, parse_request_id};
use crate::state::{
    all_oracle_requests, may_get_request, may_load_result, queued_requests, Config, Params,
    CONFIG, PARAMS,
};

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default page size of list queries
const DEFAULT_LIMIT: u32 = 100;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let InstantiateMsg {
        manager,
        oracle,
        params,
        genesis,
    } = msg;

    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let manager = deps.api.addr_validate(&manager)?;
    let oracle = match oracle {
        Some(or) => Some(deps.api.addr_validate(&or)?),
        None => None,
    };
    CONFIG.save(deps.storage, &Config { manager, oracle })?;

    match genesis {
        Some(genesis) => {
            if params.is_some() {
                return Err(ContractError::invalid_genesis(
                    "params must be set in the genesis state only",
                ));
            }
            import_genesis(deps.storage, genesis)?;
        }
        None => {
            let params = params.unwrap_or_default();
            params.validate()?;
            PARAMS.save(deps.storage, &params)?;
        }
    }

    Ok(Response::new().add_attribute(ATTR_ACTION, "instantiate"))
}

// This no-op migrate implementation allows us to upgrade within the 0.1 series.
// No state changes expected.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: Empty) -> StdResult<Response> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RequestRand {
            block_interval,
            oracle,
            consumer,
        } => execute_request_rand(deps, env, info, block_interval, oracle, consumer),
        ExecuteMsg::OracleCallback {
            request_context_id,
            entropy,
        } => execute_oracle_callback(deps, env, info, request_context_id, entropy),
        ExecuteMsg::SetConfig { manager, oracle } => {
            execute_set_config(deps, info, manager, oracle)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::EndBlock { header_hash } => sudo_end_block(deps, env, header_hash),
        SudoMsg::UpdateParams {
            min_block_interval,
            max_block_interval,
            oracle_timeout,
            rand_prec,
        } => sudo_update_params(
            deps,
            min_block_interval,
            max_block_interval,
            oracle_timeout,
            rand_prec,
        ),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<QueryResponse> {
    let response = match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?)?,
        QueryMsg::Params {} => to_json_binary(&query_params(deps)?)?,
        QueryMsg::Rand { request_id } => to_json_binary(&query_rand(deps, request_id)?)?,
        QueryMsg::Request { request_id } => to_json_binary(&query_request(deps, request_id)?)?,
        QueryMsg::RandRequestQueue {
            min_height,
            max_height,
            offset,
            limit,
        } => to_json_binary(&query_rand_request_queue(
            deps, min_height, max_height, offset, limit,
        )?)?,
        QueryMsg::OracleRequests { start_after, limit } => {
            to_json_binary(&query_oracle_requests(deps, start_after, limit)?)?
        }
        QueryMsg::ExportGenesis {} => to_json_binary(&query_export_genesis(deps)?)?,
    };
    Ok(response)
}

fn execute_request_rand(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    block_interval: u64,
    oracle: bool,
    consumer: Option<String>,
) -> Result<Response, ContractError> {
    let consumer = match consumer {
        Some(co) => deps.api.addr_validate(&co)?,
        None => info.sender,
    };
    let config = CONFIG.load(deps.storage)?;
    let params = PARAMS.load(deps.storage)?;

    let AdmissionReceipt { request, events } = admit_request(
        deps.storage,
        &env,
        &config,
        &params,
        consumer,
        block_interval,
        oracle,
    )?;

    let data = RequestRandResponse {
        request_id: request.id.clone(),
        target_height: request.target_height,
        request_context_id: request.request_context_id().cloned(),
    };
    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "request_rand")
        .add_attribute(ATTR_REQUEST_ID, request.id.to_hex())
        .add_events(events)
        .set_data(to_json_binary(&data)?))
}

fn execute_oracle_callback(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_context_id: HexBinary,
    entropy: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_eq!(
        Some(info.sender),
        config.oracle,
        ContractError::Unauthorized
    );
    let params = PARAMS.load(deps.storage)?;

    let (result, event) = oracle_bridge::resolve(
        deps.storage,
        &request_context_id,
        &entropy,
        env.block.height,
        params.rand_prec,
    )?;

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "oracle_callback")
        .add_attribute(ATTR_REQUEST_ID, result.request_id.to_hex())
        .add_event(event))
}

fn execute_set_config(
    deps: DepsMut,
    info: MessageInfo,
    manager: Option<String>,
    oracle: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // check the calling address is the authorised multisig
    ensure_eq!(info.sender, config.manager, ContractError::Unauthorized);

    let manager = match manager {
        Some(ma) => deps.api.addr_validate(&ma)?,
        None => config.manager,
    };
    let oracle = match oracle {
        Some(or) => Some(deps.api.addr_validate(&or)?),
        None => config.oracle,
    };

    CONFIG.save(deps.storage, &Config { manager, oracle })?;

    Ok(Response::new().add_attribute(ATTR_ACTION, "set_config"))
}

fn sudo_end_block(
    deps: DepsMut,
    env: Env,
    header_hash: HexBinary,
) -> Result<Response, ContractError> {
    let params = PARAMS.load(deps.storage)?;
    let BlockReceipt {
        events,
        requests_processed,
        oracle_parked,
        oracle_expired,
    } = process_block(deps.storage, env.block.height, &header_hash, &params)?;

    Ok(Response::new()
        .add_attribute(ATTR_ACTION, "end_block")
        .add_attribute(ATTR_REQUESTS_PROCESSED, requests_processed.to_string())
        .add_attribute(ATTR_ORACLE_PARKED, oracle_parked.to_string())
        .add_attribute(ATTR_ORACLE_EXPIRED, oracle_expired.to_string())
        .add_events(events))
}

fn sudo_update_params(
    deps: DepsMut,
    min_block_interval: Option<u64>,
    max_block_interval: Option<u64>,
    oracle_timeout: Option<u64>,
    rand_prec: Option<u32>,
) -> Result<Response, ContractError> {
    let current = PARAMS.load(deps.storage)?;
    let params = Params {
        min_block_interval: min_block_interval.unwrap_or(current.min_block_interval),
        max_block_interval: max_block_interval.unwrap_or(current.max_block_interval),
        oracle_timeout: oracle_timeout.unwrap_or(current.oracle_timeout),
        rand_prec: rand_prec.unwrap_or(current.rand_prec),
    };
    params.validate()?;
    PARAMS.save(deps.storage, &params)?;

    Ok(Response::new().add_attribute(ATTR_ACTION, "update_params"))
}

/// Queries report contract errors as generic errors
fn to_std_err(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        err => StdError::generic_err(err.to_string()),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config)
}

fn query_params(deps: Deps) -> StdResult<ParamsResponse> {
    PARAMS.load(deps.storage)
}

fn query_rand(deps: Deps, request_id: String) -> StdResult<RandResponse> {
    let id = check_request_id(deps.storage, &request_id).map_err(to_std_err)?;
    let rand = may_load_result(deps.storage, id.as_slice())?;
    Ok(RandResponse { rand })
}

fn query_request(deps: Deps, request_id: String) -> StdResult<RequestResponse> {
    let id = parse_request_id(&request_id).map_err(to_std_err)?;
    let request = may_get_request(deps.storage, id.as_slice())?
        .map(|(request, status)| PendingRequest { request, status });
    Ok(RequestResponse { request })
}

fn query_rand_request_queue(
    deps: Deps,
    min_height: Option<u64>,
    max_height: Option<u64>,
    offset: Option<u32>,
    limit: Option<u32>,
) -> StdResult<RandRequestQueueResponse> {
    let offset = offset.unwrap_or_default() as usize;
    let limit = limit.unwrap_or(DEFAULT_LIMIT) as usize;
    let requests = queued_requests(deps.storage, min_height, max_height, offset, limit)?;
    Ok(RandRequestQueueResponse {
        requests,
        params: PARAMS.load(deps.storage)?,
    })
}

fn query_oracle_requests(
    deps: Deps,
    start_after: Option<HexBinary>,
    limit: Option<u32>,
) -> StdResult<OracleRequestsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT) as usize;
    let requests = all_oracle_requests(
        deps.storage,
        start_after.as_ref().map(|sa| sa.as_slice()),
        limit,
    )?;
    Ok(OracleRequestsResponse { requests })
}

fn query_export_genesis(deps: Deps) -> StdResult<GenesisState> {
    export_genesis(deps.storage)
}
