//! Record types
//!
//! Records flow through the system as untyped JSON objects: the platform
//! controls the shape of what it returns, and callers choose which fields
//! survive projection.

use serde_json::{Map, Value};

/// An untyped record as returned by the actor platform's dataset.
///
/// Superset of fields; shape not controlled by this system.
pub type RawRecord = Map<String, Value>;

/// A record holding only caller-selected logical fields.
///
/// May be augmented with an `anime` field by the enrichment pass and a
/// `username` provenance field when result sets are merged.
pub type ProjectedRecord = Map<String, Value>;
