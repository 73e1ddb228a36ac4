//! Stable event types and attributes
//!
//! The values here should only be changed very carefully as it is likely that
//! indexers and clients rely on them.

/// Which entry point/message type was executed
pub const ATTR_ACTION: &str = "action";

/// Emitted once per admitted request
pub const EVENT_TYPE_REQUEST_RAND: &str = "request-rand";
/// Emitted when an oracle-backed request opens its request context
pub const EVENT_TYPE_ORACLE_REQUEST: &str = "rand-oracle-request";
/// Emitted once per produced randomness
pub const EVENT_TYPE_GENERATE_RAND: &str = "generate-rand";
/// Emitted when an oracle-backed request expires without callback
pub const EVENT_TYPE_ORACLE_TIMEOUT: &str = "rand-oracle-timeout";

pub const ATTR_REQUEST_ID: &str = "request-id";
pub const ATTR_REQUEST_CONTEXT_ID: &str = "request-context-id";
pub const ATTR_CONSUMER: &str = "consumer";
/// The height at which the request matures
pub const ATTR_TARGET_HEIGHT: &str = "target-height";
/// The height at which the randomness was produced
pub const ATTR_RAND_HEIGHT: &str = "rand-height";
/// The produced randomness as a decimal string
pub const ATTR_RAND: &str = "rand";
/// Oracle-backed requests still unanswered after this height fail
pub const ATTR_DEADLINE: &str = "deadline";

pub const ATTR_REQUESTS_PROCESSED: &str = "requests_processed";
pub const ATTR_ORACLE_PARKED: &str = "oracle_parked";
pub const ATTR_ORACLE_EXPIRED: &str = "oracle_expired";
