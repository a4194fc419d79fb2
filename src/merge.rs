use serde_json::Value;

/// Lay a decoded file over the target's current state.
///
/// Objects meet key by key, recursively. Anywhere else the file's value takes
/// the slot: scalars and arrays replace, `null` clears, and a non-object on
/// either side means the file replaces the target wholesale.
pub fn overlay(base: Value, file: Value) -> Value {
    let mut merged = base;
    lay_over(&mut merged, file);
    merged
}

fn lay_over(slot: &mut Value, file: Value) {
    match (slot, file) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(existing) => lay_over(existing, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (slot, file) => *slot = file,
    }
}
