/// Error types for the two halves of the pipeline: schema-side failures
/// raised while building a tree, and tree-side failures raised while
/// editing or serializing one.
use crate::tree::NodeId;

/// Failures while resolving, classifying, or building from a schema.
/// A build that fails never yields a partial tree.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("definition '{key}' not found (from reference '{reference}')")]
    Lookup { reference: String, key: String },
    #[error("cyclic schema reference: '{0}' refers back to itself")]
    Cycle(String),
    #[error("sum type '{0}' has no constructors")]
    EmptySumType(String),
    #[error("schema nesting exceeds {0} levels")]
    DepthExceeded(usize),
    #[error("validator '{0}' not found in blueprint")]
    UnknownValidator(String),
    #[error("validator '{validator}' has no {slot}")]
    MissingSlot { validator: String, slot: String },
    #[error("invalid blueprint JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read blueprint: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while addressing, editing, or serializing an argument tree.
#[derive(Debug, thiserror::Error)]
pub enum ArgError {
    #[error("Invalid identity: {0}")]
    UnknownId(String),
    #[error("cannot parse '{text}' as an integer: {source}")]
    Parse {
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid Plutus data value in '{label}': please correct the form entry")]
    InvalidData { id: NodeId, label: String },
    #[error("selection '{selection}' is not an option of dropdown '{label}'")]
    InvalidSelection { id: NodeId, label: String, selection: String },
    #[error("'{0}' has no editable content")]
    NotEditable(String),
    #[error("cannot encode structured value: {0}")]
    Encode(#[from] serde_json::Error),
}
