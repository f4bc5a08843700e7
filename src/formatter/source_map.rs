// src/formatter/source_map.rs

use crate::core_types::FileUnit;
use serde_json::Value;

/// Applies a map produced by the formatter to a unit that already carries one.
///
/// Only called when both the unit and the formatter's output have a map.
pub trait SourceMapApplier: Send + Sync {
    fn apply(&self, file: &mut FileUnit, map: Value);
}

/// Installs the formatter's map as the unit's map, carrying over the
/// identifying `file` and `sourceRoot` fields of the map it replaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplaceSourceMap;

impl SourceMapApplier for ReplaceSourceMap {
    fn apply(&self, file: &mut FileUnit, mut map: Value) {
        if let (Some(previous), Some(next)) = (
            file.source_map.as_ref().and_then(Value::as_object),
            map.as_object_mut(),
        ) {
            for key in ["file", "sourceRoot"] {
                if let Some(value) = previous.get(key) {
                    next.insert(key.to_string(), value.clone());
                }
            }
        }
        file.source_map = Some(map);
    }
}
