//! Shared data types for the polling pipeline.
//!
//! Contains the validated asset symbol, the per-cycle asset record with its
//! fixed field set, and the immutable snapshot published to consumers.

pub mod record;
pub mod snapshot;
pub mod symbol;

pub use record::{AssetRecord, Field, PRICE_PLACEHOLDER};
pub use snapshot::Snapshot;
pub use symbol::AssetSymbol;
