//! # trade-register
//!
//! Securities trade instruction register with currency-aware settlement
//! dates and client ranking.
//!
//! Instructions arrive as eight raw text fields, parse into immutable
//! [`Transaction`](core::transaction::Transaction)s, and land in two
//! parallel aggregations: one keyed by client, one keyed by adjusted
//! settlement date. Clients are ranked on demand by outgoing (buy) and
//! incoming (sell) USD totals.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies, clients, settlement calendar,
//!   transactions, buckets, register
//! - **report** — Fixed-width text reports over the register's aggregations
//! - **simulation** — Random instruction streams for stress testing

pub mod core;
pub mod report;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::bucket::Bucket;
    pub use crate::core::calendar::{self, DateKey};
    pub use crate::core::client::ClientId;
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::register::TradeRegister;
    pub use crate::core::transaction::{MalformedTransaction, Side, Transaction};
}
