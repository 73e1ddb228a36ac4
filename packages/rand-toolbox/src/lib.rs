//! Deterministic building blocks of the nois-rand module.
//!
//! Everything in here is a pure function of its inputs. All byte layouts are
//! part of the consensus protocol and versioned by [`SCHEME_VERSION`].

mod decimal;
mod request_id;
mod seed;

pub use crate::decimal::{random_decimal, MAX_RAND_PREC};
pub use crate::request_id::{request_context_id, request_id, tx_fingerprint};
pub use crate::seed::{native_seed, oracle_seed, SEED_LEN};

/// Version of all hashing layouts in this crate. Bumping it is consensus-breaking.
pub const SCHEME_VERSION: u32 = 1;
