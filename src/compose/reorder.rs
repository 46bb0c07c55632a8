use std::cmp::Ordering;

use serde_yaml::{Mapping, Value};

use crate::compose::policy::SortPolicy;

/// Build a new mapping with the keys of `order` first (those present, in
/// `order`'s order) and every remaining key after them, in its original
/// position. Values are not touched.
pub fn reorder_keys(map: &Mapping, order: &[&str]) -> Mapping {
    let mut sorted = Mapping::new();
    for &key in order {
        let key = Value::from(key);
        if let Some(value) = map.get(&key) {
            sorted.insert(key, value.clone());
        }
    }
    for (key, value) in map {
        if !sorted.contains_key(key) {
            sorted.insert(key.clone(), value.clone());
        }
    }
    sorted
}

/// Reorder a compose document: the top-level keys against the document order,
/// then each entry under `services` against the service order. Service values
/// that are not mappings are left alone.
pub fn reorder_document(doc: &Mapping, policy: &SortPolicy) -> Mapping {
    let mut sorted = reorder_keys(doc, policy.document);
    if let Some(Value::Mapping(services)) = sorted.get_mut(&Value::from("services")) {
        for (_, service) in services.iter_mut() {
            let Value::Mapping(fields) = service else {
                continue;
            };
            let reordered = reorder_service(fields, policy);
            *fields = reordered;
        }
    }
    sorted
}

fn reorder_service(service: &Mapping, policy: &SortPolicy) -> Mapping {
    let mut sorted = reorder_keys(service, policy.service);
    for &field in policy.alphabetized {
        if let Some(Value::Sequence(items)) = sorted.get_mut(&Value::from(field)) {
            items.sort_by(compare_values);
        }
    }
    sorted
}

/// Total order over YAML values: strings lexicographic, numbers numeric,
/// otherwise by type rank. The sort is stable, so values that compare equal
/// (mappings in particular) keep their original relative order.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Sequence(_) => 4,
        Value::Mapping(_) => 5,
        Value::Tagged(_) => 6,
    }
}
