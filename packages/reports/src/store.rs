//! Report storage contract and an in-memory implementation.

use std::io::Read;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use saferoute_reports_models::{AccidentReport, NewAccidentReport};
use uuid::Uuid;

use crate::ReportError;

/// Minimal document-store contract for accident reports.
///
/// Implementations are shared between the report feed poller and request
/// handlers, so every method takes `&self`.
pub trait ReportStore: Send + Sync {
    /// Stores a new, unverified report and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// * If the backing store fails
    fn insert(&self, report: NewAccidentReport) -> Result<AccidentReport, ReportError>;

    /// Looks up a report by id.
    ///
    /// # Errors
    ///
    /// * If the backing store fails
    fn get(&self, id: &str) -> Result<Option<AccidentReport>, ReportError>;

    /// Returns up to `limit` reports, most recently stored first.
    ///
    /// # Errors
    ///
    /// * If the backing store fails
    fn recent(&self, limit: usize) -> Result<Vec<AccidentReport>, ReportError>;

    /// Returns all reports submitted by `user_id`, most recently stored
    /// first.
    ///
    /// # Errors
    ///
    /// * If the backing store fails
    fn by_user(&self, user_id: &str) -> Result<Vec<AccidentReport>, ReportError>;

    /// Deletes a report. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// * If the backing store fails
    fn delete(&self, id: &str) -> Result<bool, ReportError>;
}

/// Report store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<AccidentReport>>,
}

impl InMemoryReportStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding already-stored reports.
    #[must_use]
    pub const fn from_reports(reports: Vec<AccidentReport>) -> Self {
        Self {
            reports: RwLock::new(reports),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<AccidentReport>>, ReportError> {
        self.reports.read().map_err(|_| ReportError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<AccidentReport>>, ReportError> {
        self.reports.write().map_err(|_| ReportError::Poisoned)
    }
}

/// Newest first by `created_at`; on ties the later-inserted report comes
/// first.
fn newest_first<'a>(reports: impl DoubleEndedIterator<Item = &'a AccidentReport>) -> Vec<AccidentReport> {
    let mut sorted: Vec<AccidentReport> = reports.rev().cloned().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

impl ReportStore for InMemoryReportStore {
    fn insert(&self, report: NewAccidentReport) -> Result<AccidentReport, ReportError> {
        let stored = AccidentReport::from_new(Uuid::new_v4().to_string(), report, Utc::now());
        self.write()?.push(stored.clone());
        log::debug!("Stored accident report {} at {}", stored.id, stored.location);
        Ok(stored)
    }

    fn get(&self, id: &str) -> Result<Option<AccidentReport>, ReportError> {
        Ok(self.read()?.iter().find(|report| report.id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AccidentReport>, ReportError> {
        let mut reports = newest_first(self.read()?.iter());
        reports.truncate(limit);
        Ok(reports)
    }

    fn by_user(&self, user_id: &str) -> Result<Vec<AccidentReport>, ReportError> {
        let reports = self.read()?;
        Ok(newest_first(
            reports
                .iter()
                .filter(|report| report.user_id.as_deref() == Some(user_id)),
        ))
    }

    fn delete(&self, id: &str) -> Result<bool, ReportError> {
        let mut reports = self.write()?;
        let before = reports.len();
        reports.retain(|report| report.id != id);
        Ok(reports.len() != before)
    }
}

/// Reads a JSON array of stored reports.
///
/// # Errors
///
/// * [`ReportError::Json`] if the input is not a valid report array
pub fn read_reports(reader: impl Read) -> Result<Vec<AccidentReport>, ReportError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads a JSON array of stored reports from a file.
///
/// # Errors
///
/// * [`ReportError::Io`] if the file cannot be opened
/// * [`ReportError::Json`] if the file is not a valid report array
pub fn load_reports(path: &Path) -> Result<Vec<AccidentReport>, ReportError> {
    let file = std::fs::File::open(path)?;
    let reports = read_reports(std::io::BufReader::new(file))?;
    log::info!("Loaded {} accident reports from {}", reports.len(), path.display());
    Ok(reports)
}
