mod config;
mod counters;
mod oracle;
mod requests;
mod results;

pub use config::{Config, Params, CONFIG, PARAMS};
pub use counters::{last_processed_height, next_admission_sequence, set_last_processed_height};
pub use oracle::{
    all_oracle_requests, expired_oracle_requests, may_load_oracle_request, park_oracle_request,
    take_oracle_request, OracleRequest,
};
pub use requests::{
    all_pending_requests, dequeue_for_oracle, due_requests, get_request, has_request,
    insert_awaiting_oracle, insert_request, may_get_request, overdue_heights, prune_queue_height,
    queued_requests, remove_request, RandSource, Request, RequestStatus,
};
pub use results::{all_results, has_result, may_load_result, save_result, RandResult};

/// Top level storage key. Values must not conflict.
/// Each key is only one byte long to ensure we use the smallest possible storage keys.
pub enum TopKey {
    Config,
    Params,
    Requests,
    Queue,
    QueueLastPos,
    OracleWaiting,
    OracleDeadlines,
    Results,
    AdmissionSequence,
    LastProcessedHeight,
}

impl TopKey {
    const fn as_str(&self) -> &'static str {
        match self {
            TopKey::Config => "c",
            TopKey::Params => "p",
            TopKey::Requests => "r",
            TopKey::Queue => "q",
            TopKey::QueueLastPos => "Q",
            TopKey::OracleWaiting => "o",
            TopKey::OracleDeadlines => "d",
            TopKey::Results => "R",
            TopKey::AdmissionSequence => "s",
            TopKey::LastProcessedHeight => "h",
        }
    }
}
