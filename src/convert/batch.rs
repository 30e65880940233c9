//! Batch conversions

use tracing::debug;

use super::{from_map, to_map_dyn};
use crate::property::{PropertyMap, PropertyResult, Record};

/// Convert every record to a map, keeping null fields
///
/// An empty slice yields an empty vector.
pub fn to_maps<R: Record>(records: &[R]) -> Vec<PropertyMap> {
    records
        .iter()
        .map(|record| to_map_dyn(record, false))
        .collect()
}

/// Build one `R` per map
///
/// The first failure aborts the whole batch; no partial result is returned.
pub fn from_maps<R: Record>(maps: &[PropertyMap]) -> PropertyResult<Vec<R>> {
    if maps.is_empty() {
        return Ok(Vec::new());
    }

    let records = maps
        .iter()
        .map(|map| from_map::<R>(Some(map)))
        .collect::<PropertyResult<Vec<_>>>()?;

    debug!(
        record = R::record_descriptor().name,
        count = records.len(),
        "Converted maps to records"
    );
    Ok(records)
}
