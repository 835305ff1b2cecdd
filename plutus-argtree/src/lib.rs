//! Editable argument trees for contract blueprints.
//!
//! A schema position is resolved against the blueprint's definitions,
//! classified by shape, and built into an [`ArgNode`] tree the UI edits in
//! place. [`ArgNode::to_plutus_val`] turns the edited tree back into
//! [`PlutusData`].
pub mod blueprint;
pub mod builder;
pub mod classify;
pub mod error;
pub mod plutus;
pub mod resolver;
pub mod schema;
pub mod tree;

pub use blueprint::{Blueprint, Slot, ValidatorArgs};
pub use builder::{build_arg, build_schema, BuildOptions, Builder};
pub use error::{ArgError, BuildError};
pub use plutus::PlutusData;
pub use schema::{Definitions, Param, SchemaDescriptor};
pub use tree::{deep_copy, ArgNode, NodeId, NodeKind};
