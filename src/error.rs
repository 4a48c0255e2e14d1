//! # Error Kinds
//!
//! Every fallible operation in this crate returns `eyre::Result`, and every
//! error it produces carries a [`RecordError`] as its root cause. Callers that
//! need to branch on the failure mode can recover the kind with
//! `report.downcast_ref::<RecordError>()`.
//!
//! ## Kinds
//!
//! | Kind | Meaning | Recovery |
//! |------|---------|----------|
//! | `MalformedRecord` | Input bytes exhausted or structurally invalid during decode | Reject the input |
//! | `FieldNotPresent` | Setter invoked on an absent field | Call `make_field_present` first |
//! | `FieldTypeMismatch` | Accessor type disagrees with the stored variant | Use the matching accessor |
//! | `SchemaViolation` | Defect in the schema definition or its use | Fix the schema |
//!
//! `FieldTypeMismatch` and `SchemaViolation` indicate bugs in calling code
//! rather than bad input data; both leave the record untouched.

use thiserror::Error;

use crate::fields::TypeTag;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("field {0} is not present")]
    FieldNotPresent(&'static str),

    #[error("field {field}: expected {expected}, found {found}")]
    FieldTypeMismatch {
        field: &'static str,
        expected: TypeTag,
        found: TypeTag,
    },

    #[error("schema violation: {0}")]
    SchemaViolation(String),
}
