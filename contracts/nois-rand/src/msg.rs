use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::HexBinary;

use crate::genesis::GenesisState;
use crate::state::{Config, OracleRequest, Params, RandResult, Request, RequestStatus};

#[cw_serde]
pub struct InstantiateMsg {
    pub manager: String,
    /// The address allowed to answer oracle-backed requests. Leave unset to run without oracle.
    pub oracle: Option<String>,
    /// Initial params. Ignored if `genesis` is set. Defaults apply if unset.
    pub params: Option<Params>,
    /// A previously exported state to start from
    pub genesis: Option<GenesisState>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Requests randomness to be produced `block_interval` blocks after the current one.
    /// The request ID is returned in the response data as [`RequestRandResponse`].
    RequestRand {
        block_interval: u64,
        /// Mix in entropy from the external oracle
        oracle: bool,
        /// The address the request is made for. Defaults to the sender.
        consumer: Option<String>,
    },
    /// Delivers oracle entropy for a matured request. Only the oracle can do this.
    OracleCallback {
        request_context_id: HexBinary,
        entropy: HexBinary,
    },
    /// Only the manager can do this
    SetConfig {
        manager: Option<String>,
        oracle: Option<String>,
    },
}

/// Messages sent by the chain itself
#[cw_serde]
pub enum SudoMsg {
    /// Sent exactly once per block after all transactions of the block were executed
    EndBlock { header_hash: HexBinary },
    /// Governance param change. Unset fields remain unchanged.
    UpdateParams {
        min_block_interval: Option<u64>,
        max_block_interval: Option<u64>,
        oracle_timeout: Option<u64>,
        rand_prec: Option<u32>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get the config state
    #[returns(ConfigResponse)]
    Config {},
    #[returns(ParamsResponse)]
    Params {},
    /// Gets the produced randomness of a request. Unknown request IDs result in an error.
    #[returns(RandResponse)]
    Rand { request_id: String },
    /// Gets a request that did not produce randomness yet
    #[returns(RequestResponse)]
    Request { request_id: String },
    /// Lists queued requests in processing order
    #[returns(RandRequestQueueResponse)]
    RandRequestQueue {
        /// If set only requests with a target height >= this value are returned
        min_height: Option<u64>,
        /// If set only requests with a target height <= this value are returned
        max_height: Option<u64>,
        offset: Option<u32>,
        /// The max number of entries returned. If you set this too high, your query runs out of gas.
        /// When unset, an implementation defined default will be used.
        limit: Option<u32>,
    },
    /// Lists matured requests waiting for the oracle ordered by request context ID
    #[returns(OracleRequestsResponse)]
    OracleRequests {
        start_after: Option<HexBinary>,
        /// The max number of entries returned. If you set this too high, your query runs out of gas.
        /// When unset, an implementation defined default will be used.
        limit: Option<u32>,
    },
    #[returns(GenesisState)]
    ExportGenesis {},
}

// We define a custom struct for each query response
pub type ConfigResponse = Config;

pub type ParamsResponse = Params;

#[cw_serde]
pub struct RandResponse {
    /// None as long as the request is pending
    pub rand: Option<RandResult>,
}

#[cw_serde]
pub struct PendingRequest {
    pub request: Request,
    pub status: RequestStatus,
}

#[cw_serde]
pub struct RequestResponse {
    pub request: Option<PendingRequest>,
}

#[cw_serde]
pub struct RandRequestQueueResponse {
    pub requests: Vec<Request>,
    pub params: Params,
}

#[cw_serde]
pub struct OracleRequestsResponse {
    pub requests: Vec<OracleRequest>,
}

/// Data of the response to [`ExecuteMsg::RequestRand`]
#[cw_serde]
pub struct RequestRandResponse {
    pub request_id: HexBinary,
    pub target_height: u64,
    /// Set for oracle-backed requests
    pub request_context_id: Option<HexBinary>,
}
