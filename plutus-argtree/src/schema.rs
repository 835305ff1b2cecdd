/// Raw blueprint schema descriptors, as published alongside a compiled
/// contract. Descriptors carry structure only: there is no discriminant
/// tag, so every key is optional and the classifier decides the shape.
use serde::Deserialize;
use std::collections::BTreeMap;

/// Flat table of named definitions. Read-only during a build.
pub type Definitions = BTreeMap<String, SchemaDescriptor>;

/// One schema position: a definition, a constructor field, or the schema
/// of a datum/redeemer/parameter. Either a `$ref` or an inline shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub data_type: Option<String>,
    pub any_of: Option<Vec<ConstructorSchema>>,
}

impl SchemaDescriptor {
    /// An inline reference with an optional label, as found in field lists.
    pub fn reference(title: Option<&str>, reference: &str) -> Self {
        Self {
            reference: Some(reference.to_string()),
            title: title.map(str::to_string),
            ..Self::default()
        }
    }
}

/// One alternative of a sum type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorSchema {
    pub title: Option<String>,
    pub index: u64,
    #[serde(default)]
    pub fields: Vec<SchemaDescriptor>,
}

/// A labelled top-level argument: datum, redeemer, or one parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Param {
    pub title: Option<String>,
    pub schema: SchemaDescriptor,
}
