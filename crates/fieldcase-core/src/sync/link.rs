//! Link resolution between field and central snapshots

use std::collections::BTreeMap;

use crate::models::{CentralRecord, FieldRecord};

/// Outcome of pairing the two snapshots.
#[derive(Debug, Default)]
pub struct LinkSet {
    /// Field/central pairs joined by a cross-reference id
    pub linked: Vec<(FieldRecord, CentralRecord)>,
    /// Field records no central record corresponds to
    pub unlinked_field: Vec<FieldRecord>,
    /// Central records no field record claims
    pub unlinked_central: Vec<CentralRecord>,
}

/// Pair records across the two collections.
///
/// A pair links iff `field.link_id == central.id`; before a first push
/// completes, the reciprocal `central.link_id == field.id` index is
/// consulted instead. Each central record is claimed at most once; first
/// match wins and later claimants come back as unlinked. Malformed input
/// (duplicate links, records without ids) never panics.
#[must_use]
pub fn resolve_links(
    field_records: Vec<FieldRecord>,
    central_records: Vec<CentralRecord>,
) -> LinkSet {
    let mut by_central_id: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_reciprocal: BTreeMap<String, usize> = BTreeMap::new();
    for (index, central) in central_records.iter().enumerate() {
        if let Some(id) = &central.id {
            by_central_id.entry(id.to_string()).or_insert(index);
        }
        if let Some(link) = &central.link_id {
            by_reciprocal.entry(link.to_string()).or_insert(index);
        }
    }

    let mut claimed = vec![false; central_records.len()];
    let mut paired: Vec<(FieldRecord, usize)> = Vec::new();
    let mut set = LinkSet::default();

    for field in field_records {
        let candidate = field
            .link_id
            .as_ref()
            .and_then(|link| by_central_id.get(link.as_str()))
            .or_else(|| by_reciprocal.get(field.id.as_str()))
            .copied();

        match candidate {
            Some(index) if !claimed[index] => {
                claimed[index] = true;
                paired.push((field, index));
            }
            // already claimed (duplicate link) or nothing to pair with
            _ => set.unlinked_field.push(field),
        }
    }

    let mut centrals: Vec<Option<CentralRecord>> = central_records.into_iter().map(Some).collect();
    for (field, index) in paired {
        if let Some(central) = centrals[index].take() {
            set.linked.push((field, central));
        }
    }
    set.unlinked_central = centrals.into_iter().flatten().collect();
    set
}
