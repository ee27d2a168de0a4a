//! Session facade over the registry.
//!
//! A [`Session`] is the single owner of the register for one run of the
//! tool. Front ends call these operations and nothing else; in particular,
//! the registry is never mutated with a half-decoded import.

use chrono::NaiveDate;
use thiserror::Error;

use sds_model::Substance;
use sds_xlsx::{XlsxError, decode_workbook, encode_workbook};

use crate::currency::{CurrencyStatus, currency_status};
use crate::filter::filter_by_name;
use crate::registry::SubstanceRegistry;

/// Import failures surfaced to the caller.
///
/// Any of these leaves the registry exactly as it was.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The workbook could not be decoded.
    #[error(transparent)]
    Decode(#[from] XlsxError),

    /// A second import was requested while one is still pending.
    #[error("an import is already in progress")]
    AlreadyPending,

    /// `finish_import` was called without a matching `begin_import`.
    #[error("no import is in progress")]
    NotPending,
}

/// One interactive session over a substance register.
#[derive(Debug, Default)]
pub struct Session {
    registry: SubstanceRegistry,
    import_pending: bool,
}

impl Session {
    /// A session over an empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session over an existing register.
    pub fn with_registry(registry: SubstanceRegistry) -> Self {
        Self {
            registry,
            import_pending: false,
        }
    }

    pub fn registry(&self) -> &SubstanceRegistry {
        &self.registry
    }

    /// Append one record. Adding stays legal while an import is pending;
    /// if that import then succeeds, the whole register is replaced and
    /// the interleaved add is lost. Full-replace always wins.
    pub fn add_substance(&mut self, record: Substance) {
        self.registry.add(record);
    }

    /// Encode the whole register as workbook bytes.
    pub fn export_registry(&self) -> Result<Vec<u8>, XlsxError> {
        encode_workbook(self.registry.records())
    }

    /// Decode `bytes` and replace the register with the result.
    ///
    /// All-or-nothing: on any decode failure the register keeps its
    /// current contents. Returns the number of imported records.
    pub fn import_registry(&mut self, bytes: &[u8]) -> Result<usize, ImportError> {
        self.begin_import()?;
        let decoded = decode_workbook(bytes);
        self.finish_import(decoded)
    }

    /// Mark an import as pending.
    ///
    /// Only one import may be in flight at a time; a second request is
    /// rejected rather than queued or superseded.
    pub fn begin_import(&mut self) -> Result<(), ImportError> {
        if self.import_pending {
            return Err(ImportError::AlreadyPending);
        }
        self.import_pending = true;
        Ok(())
    }

    /// Deliver the outcome of a pending import.
    ///
    /// On success the decoded records replace the register wholesale; on
    /// failure the register is untouched and the decode error is passed
    /// back to the caller.
    pub fn finish_import(
        &mut self,
        result: Result<Vec<Substance>, XlsxError>,
    ) -> Result<usize, ImportError> {
        if !self.import_pending {
            return Err(ImportError::NotPending);
        }
        self.import_pending = false;
        match result {
            Ok(records) => {
                let count = records.len();
                self.registry.replace_all(records);
                tracing::info!(records = count, "import replaced register");
                Ok(count)
            }
            Err(error) => {
                tracing::warn!(%error, "import failed, register unchanged");
                Err(ImportError::Decode(error))
            }
        }
    }

    /// Records whose name contains `term`, in registration order.
    pub fn search_substances(&self, term: &str) -> Vec<Substance> {
        filter_by_name(self.registry.records(), term)
    }

    /// Currency of one record as of `today`.
    pub fn currency_of(&self, record: &Substance, today: NaiveDate) -> CurrencyStatus {
        currency_status(record.sds_date.as_deref(), today)
    }
}
