//! Change report: what a reconciliation added and updated.

use std::collections::BTreeMap;

use cb_core::MetadataRecord;
use serde::{Deserialize, Serialize};

/// Records added to and updated in the table, keyed by canonical filename.
///
/// Purely observational; nothing reads it back during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub added: BTreeMap<String, MetadataRecord>,
    pub updated: BTreeMap<String, MetadataRecord>,
}

impl ChangeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_added(&mut self, record: &MetadataRecord) {
        self.added.insert(record.filename.clone(), record.clone());
    }

    pub fn record_updated(&mut self, record: &MetadataRecord) {
        self.updated.insert(record.filename.clone(), record.clone());
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }

    /// Pretty-printed JSON for human review.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
