//! # Wire Contract Tests
//!
//! This crate provides "golden" tests for the shapes the external editor
//! and the host depend on, so they don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: the wire shapes are written down as tests
//! - **Testability first**: contract tests fail when a field is renamed
//! - **Mechanism not policy**: define what must stay stable, not how the
//!   collaborators use it
//!
//! ## Structure
//!
//! Each externally visible schema has a module with tests that verify
//! field names, frame classification rules and payload invariants.

pub mod channel_frames;
pub mod event_trail;

/// Common test helpers for contract validation
pub mod test_helpers {
    use serde::Serialize;
    use serde_json::Value;

    /// Serializes a value to its wire JSON
    pub fn to_wire<T: Serialize>(value: &T) -> Value {
        serde_json::to_value(value).expect("contract type serializes")
    }

    /// Verifies every named field is present on a wire object
    pub fn verify_fields(wire: &Value, fields: &[&str]) {
        for field in fields {
            assert!(
                wire.get(field).is_some(),
                "contract field `{}` missing from {}",
                field,
                wire
            );
        }
    }

    /// Verifies a wire object has exactly the named fields
    pub fn verify_exact_fields(wire: &Value, fields: &[&str]) {
        verify_fields(wire, fields);
        let object = wire.as_object().expect("wire value is an object");
        assert_eq!(
            object.len(),
            fields.len(),
            "unexpected extra fields in {}",
            wire
        );
    }
}
