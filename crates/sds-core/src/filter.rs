use sds_model::Substance;

/// Records whose name contains `term`, compared case-insensitively.
///
/// Pure function over its two inputs: relative order is preserved and an
/// empty term matches everything. Recomputed fresh on every call — register
/// sizes stay small enough that an index would be overhead.
pub fn filter_by_name(records: &[Substance], term: &str) -> Vec<Substance> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
