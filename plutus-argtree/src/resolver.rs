/// Reference resolution against the definitions table.
/// Resolution is lazy: one reference per call, nothing is flattened ahead.
use crate::error::BuildError;
use crate::schema::{Definitions, SchemaDescriptor};

const DEFINITIONS_DELIMITER: &str = "/definitions/";
const ESCAPED_SLASH: &str = "~1";

/// Turns `#/definitions/aiken~1Foo` into the lookup key `aiken/Foo`.
/// Only the last segment after the delimiter is used.
pub fn ref_to_key(reference: &str) -> String {
    let last = reference
        .rsplit(DEFINITIONS_DELIMITER)
        .next()
        .unwrap_or(reference);
    last.replace(ESCAPED_SLASH, "/")
}

/// Looks up the descriptor a reference points to.
pub fn resolve<'a>(
    reference: &str,
    definitions: &'a Definitions,
) -> Result<&'a SchemaDescriptor, BuildError> {
    let key = ref_to_key(reference);
    log::debug!("resolving '{reference}' as '{key}'");
    definitions.get(&key).ok_or_else(|| BuildError::Lookup {
        reference: reference.to_string(),
        key,
    })
}
