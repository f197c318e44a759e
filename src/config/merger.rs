//! Layering of requirements files.
//!
//! `phpreqs.local.yml` is merged over `phpreqs.yml` before parsing.
//!
//! # Merge Rules
//!
//! - Mappings are merged key by key, recursively
//! - Sequences in the overlay replace the base sequence
//! - A null in the overlay removes the key
//! - Any other overlay value replaces the base value

use serde_yaml::Value;

/// Merge `overlay` over `base`, returning the combined value.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let (Value::Mapping(base_map), Value::Mapping(overlay_map)) = (base, overlay) else {
        return overlay.clone();
    };

    let mut merged = base_map.clone();
    for (key, value) in overlay_map {
        if value.is_null() {
            merged.remove(key);
            continue;
        }
        let combined = match base_map.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    Value::Mapping(merged)
}

/// Fold a list of layers into one value, last layer winning.
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}
