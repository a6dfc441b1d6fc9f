use serde_json::Value;
use tracing::trace;

use super::identity::{resolve_identity, sort_by_numeric_id};
use super::merge_objects;

/// Merges a source array of records into `target`.
///
/// Each source record is matched against the target by its identity key. A match
/// is merged in place with [`merge_objects`]; anything else is appended. Target
/// elements with no counterpart in `source` are left untouched. Appending a
/// record keyed by a numeric `id` re-sorts the whole array by `id`.
pub fn merge_structured_array(target: &mut Vec<Value>, source: &[Value]) {
    for element in source {
        let Value::Object(record) = element else {
            trace!("appending non-record element");
            target.push(element.clone());
            continue;
        };

        let Some(identity) = resolve_identity(record) else {
            trace!("appending record without identity key");
            target.push(element.clone());
            continue;
        };

        let matched = target
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|existing| identity.matches_record(existing));

        match matched {
            Some(existing) => {
                trace!(?identity, "merging matched record");
                merge_objects(existing, record);
            },
            None => {
                trace!(?identity, "appending unmatched record");
                target.push(element.clone());
                if identity.orders_array() {
                    sort_by_numeric_id(target);
                }
            },
        }
    }
}
