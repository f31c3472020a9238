//! Hash helpers (SHA-256 en hex).

use sha2::{Digest, Sha256};

use super::to_canonical_json;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Sha256::new();
    h.update(input.as_bytes());
    format!("{:x}", h.finalize())
}

/// Hash del JSON canónico de un valor; independiente del orden de claves.
pub fn hash_value(value: &serde_json::Value) -> String {
    hash_str(&to_canonical_json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_change_hash() {
        let a = hash_value(&json!({"source": "node_1", "target": "node_2"}));
        let b = hash_value(&json!({"target": "node_2", "source": "node_1"}));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
