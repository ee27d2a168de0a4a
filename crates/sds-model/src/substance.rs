use serde::{Deserialize, Serialize};

use crate::pictogram::split_codes;

/// One Safety Data Sheet record.
///
/// Every field is deliberately permissive: an empty `name` is legal (the
/// register is an entry tool, not a validator), `producer`, `link` and
/// `notes` carry whatever text was entered, and `ghs` holds hazard codes in
/// the order they were given, duplicates and unknown codes included.
///
/// `sds_date` keeps the raw `YYYY-MM-DD` cell text instead of a parsed
/// date. The currency rule has to treat an unparseable date as "no sheet on
/// file" rather than reject the record, and a spreadsheet round trip must
/// hand back exactly the text it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substance {
    pub name: String,
    pub producer: String,
    pub sds_date: Option<String>,
    pub link: String,
    pub notes: String,
    pub ghs: Vec<String>,
}

/// Field-by-field builder for a [`Substance`].
///
/// Each setter replaces exactly one field; nothing is interpreted until
/// [`build`](Self::build) materializes the record at submit time.
#[derive(Debug, Clone, Default)]
pub struct SubstanceDraft {
    name: String,
    producer: String,
    sds_date: String,
    link: String,
    notes: String,
    ghs: Vec<String>,
}

impl SubstanceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    /// Raw `YYYY-MM-DD` text; blank means the sheet date is not on file.
    pub fn sds_date(mut self, sds_date: impl Into<String>) -> Self {
        self.sds_date = sds_date.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Pictogram codes from their comma-joined text form, e.g.
    /// `"GHS07, GHS08"`.
    pub fn ghs_codes(mut self, codes: &str) -> Self {
        self.ghs = split_codes(codes);
        self
    }

    pub fn build(self) -> Substance {
        let sds_date = if self.sds_date.trim().is_empty() {
            None
        } else {
            Some(self.sds_date)
        };
        Substance {
            name: self.name,
            producer: self.producer,
            sds_date,
            link: self.link,
            notes: self.notes,
            ghs: self.ghs,
        }
    }
}
