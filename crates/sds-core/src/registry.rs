use sds_model::{Substance, SubstanceDraft};

/// Ordered collection of substance records.
///
/// Insertion order is the canonical display order: no sorting, no
/// deduplication by name. Mutation happens through [`add`](Self::add) and
/// [`replace_all`](Self::replace_all) only, and both install fully-built
/// records, so an observer never sees a partially-constructed entry.
#[derive(Debug, Clone, Default)]
pub struct SubstanceRegistry {
    records: Vec<Substance>,
}

impl SubstanceRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `records` in the given order.
    pub fn from_records(records: Vec<Substance>) -> Self {
        Self { records }
    }

    /// The demo register the tool historically started with.
    pub fn seed() -> Self {
        Self::from_records(vec![
            SubstanceDraft::new()
                .name("MOBIL DTE OIL HEAVY")
                .producer("ExxonMobil")
                .sds_date("2022-12-18")
                .link("https://www.msds.exxonmobil.com")
                .notes("Zgodna z (UE) 2020/878")
                .ghs_codes("GHS07,GHS08")
                .build(),
            SubstanceDraft::new()
                .name("Hydraulic Oil Premium 32")
                .producer("Statoil")
                .sds_date("2009-09-24")
                .notes("Nieaktualna, wymaga aktualizacji")
                .build(),
            SubstanceDraft::new()
                .name("MYE 643")
                .producer("Brak danych")
                .notes("Brak karty – należy pozyskać")
                .build(),
        ])
    }

    /// Append `record` as the new last element.
    pub fn add(&mut self, record: Substance) {
        tracing::debug!(name = %record.name, "registry add");
        self.records.push(record);
    }

    /// Discard all current records and install `records` in the given
    /// order. Callers hand in a fully-decoded sequence; a failed import
    /// never reaches this point.
    pub fn replace_all(&mut self, records: Vec<Substance>) {
        tracing::debug!(
            previous = self.records.len(),
            installed = records.len(),
            "registry replace"
        );
        self.records = records;
    }

    /// Snapshot of the current records. Later registry mutation does not
    /// change a snapshot already handed out.
    pub fn list(&self) -> Vec<Substance> {
        self.records.clone()
    }

    /// Borrowed view for read-only passes that do not need a snapshot.
    pub fn records(&self) -> &[Substance] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
