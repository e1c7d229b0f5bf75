//! Generic panel data provider.

use chrono::{DateTime, Utc};

use gridwatch_core::{DomainError, DomainResult, Lifecycle, RecordId};

/// A panel-owned domain record.
///
/// `build` performs the record family's input validation and derived-field
/// computation; it is the only way a record enters a provider, so a stored
/// record is always well-formed.
pub trait PanelRecord: Clone {
    /// Validated creation input for this record family.
    type Input;
    /// Status enum with this family's fixed transition table.
    type Status: Lifecycle;

    /// Short noun for logs and error text ("booking", "signal", ...).
    fn record_kind() -> &'static str;

    fn build(id: RecordId, input: Self::Input, now: DateTime<Utc>) -> DomainResult<Self>;

    fn id(&self) -> RecordId;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);
}

/// Owner of one panel's records.
///
/// Records are kept in insertion order. Terminal-state records stay in the
/// collection; history is cancelled or completed, never deleted.
#[derive(Debug, Clone, Default)]
pub struct PanelProvider<R: PanelRecord> {
    records: Vec<R>,
}

impl<R: PanelRecord> PanelProvider<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// All records, insertion-ordered.
    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Validate input, derive fields, and append the new record.
    pub fn create(&mut self, input: R::Input, now: DateTime<Utc>) -> DomainResult<&R> {
        let record = R::build(RecordId::new(), input, now)?;
        tracing::info!(kind = R::record_kind(), id = %record.id(), "record created");
        self.records.push(record);
        Ok(self.records.last().ok_or_else(|| {
            DomainError::storage("record vanished after insert")
        })?)
    }

    /// Move a record along its transition table.
    ///
    /// Fails `NotFound` for an absent id and `InvalidTransition` for an edge
    /// the table does not list; in both cases no state changes.
    pub fn update_status(&mut self, id: RecordId, status: R::Status) -> DomainResult<&R> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found(id))?;

        record.status().check_transition(status)?;
        record.set_status(status);
        tracing::info!(kind = R::record_kind(), %id, status = %status, "status changed");
        Ok(record)
    }

    /// Mutate one record in place through a closure.
    ///
    /// For non-status edits (timings, assignments) that the dispatch layer
    /// has already validated.
    pub fn update_with<F>(&mut self, id: RecordId, apply: F) -> DomainResult<&R>
    where
        F: FnOnce(&mut R),
    {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found(id))?;
        apply(record);
        Ok(record)
    }
}
