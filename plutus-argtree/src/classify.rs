/// Shape classification: decides what kind of input a resolved descriptor
/// becomes by looking at which keys it carries, then normalizes it into an
/// intermediate value with a fresh identity and default content.
use crate::schema::{ConstructorSchema, SchemaDescriptor};
use crate::tree::NodeId;

const DATA_TITLE: &str = "Data";
const DATA_DESCRIPTION: &str = "Any Plutus data.";
const UNKNOWN_LABEL: &str = "unknown";

pub const DEFAULT_BYTES: &str = "";
pub const DEFAULT_INT: i128 = 0;
pub const DEFAULT_DATA: &str = "{}";

/// A classified schema node, one per position visited.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<'a> {
    pub id: NodeId,
    pub label: String,
    pub shape: Shape<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    /// Constructors in schema order. Their fields are still unresolved.
    Sum(Vec<NormalizedConstructor<'a>>),
    Bytes(String),
    Int(i128),
    Data(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedConstructor<'a> {
    pub id: NodeId,
    pub label: String,
    pub index: u64,
    pub fields: &'a [SchemaDescriptor],
}

impl<'a> From<&'a ConstructorSchema> for NormalizedConstructor<'a> {
    fn from(ctor: &'a ConstructorSchema) -> Self {
        NormalizedConstructor {
            id: NodeId::new(),
            label: ctor.title.clone().unwrap_or_else(|| UNKNOWN_LABEL.into()),
            index: ctor.index,
            fields: &ctor.fields,
        }
    }
}

pub fn is_opaque_data(desc: &SchemaDescriptor) -> bool {
    desc.title.as_deref() == Some(DATA_TITLE)
        && desc.description.as_deref() == Some(DATA_DESCRIPTION)
}

/// Classifies an already-resolved descriptor. `label` is the title of the
/// field or parameter that referenced it, if any.
///
/// Shapes that are not recognised become integers rather than errors, so
/// partially specified schemas still produce a usable form.
pub fn classify<'a>(label: Option<&str>, desc: &'a SchemaDescriptor) -> Normalized<'a> {
    let label = label
        .or(desc.title.as_deref())
        .unwrap_or(UNKNOWN_LABEL)
        .to_string();

    let shape = if let Some(ctors) = &desc.any_of {
        Shape::Sum(ctors.iter().map(NormalizedConstructor::from).collect())
    } else if is_opaque_data(desc) {
        Shape::Data(DEFAULT_DATA.into())
    } else {
        match desc.data_type.as_deref() {
            Some("bytes") => Shape::Bytes(DEFAULT_BYTES.into()),
            Some("integer") => Shape::Int(DEFAULT_INT),
            other => {
                log::warn!("'{label}' has unrecognised shape {other:?}, treating it as an integer");
                Shape::Int(DEFAULT_INT)
            }
        }
    };

    Normalized {
        id: NodeId::new(),
        label,
        shape,
    }
}
