/// Argument tree builder: resolves, classifies, and recursively turns
/// schema positions into tree nodes.
use crate::classify::{classify, Normalized, NormalizedConstructor, Shape};
use crate::error::BuildError;
use crate::resolver::resolve;
use crate::schema::{Definitions, Param, SchemaDescriptor};
use crate::tree::{ArgNode, BytesField, DataField, DropdownField, DropdownOption, IntField};

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Maximum number of nested schema positions below the root.
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builds one tree per call. The definitions table is only read, so a
/// builder (or the table) can be reused for any number of trees.
pub struct Builder<'a> {
    definitions: &'a Definitions,
    options: BuildOptions,
    /// References on the current descent path.
    path: Vec<String>,
    depth: usize,
}

impl<'a> Builder<'a> {
    pub fn new(definitions: &'a Definitions, options: BuildOptions) -> Self {
        Self {
            definitions,
            options,
            path: Vec::new(),
            depth: 0,
        }
    }

    pub fn build_param(&mut self, param: &Param) -> Result<ArgNode, BuildError> {
        self.build_field(param.title.as_deref(), &param.schema)
    }

    /// Builds the node for one schema position. A reference that shows up
    /// again below itself is a cycle.
    pub fn build_field(
        &mut self,
        label: Option<&str>,
        desc: &SchemaDescriptor,
    ) -> Result<ArgNode, BuildError> {
        if self.depth >= self.options.max_depth {
            return Err(BuildError::DepthExceeded(self.options.max_depth));
        }
        let mark = self.path.len();
        self.depth += 1;
        let result = self.build_resolved(label, desc);
        self.depth -= 1;
        self.path.truncate(mark);
        result
    }

    fn build_resolved(
        &mut self,
        label: Option<&str>,
        desc: &SchemaDescriptor,
    ) -> Result<ArgNode, BuildError> {
        let label = label.or(desc.title.as_deref());
        let mut current = desc;
        while let Some(reference) = &current.reference {
            if self.path.iter().any(|r| r == reference) {
                return Err(BuildError::Cycle(reference.clone()));
            }
            self.path.push(reference.clone());
            current = resolve(reference, self.definitions)?;
        }
        let normalized = classify(label, current);
        self.build_normalized(normalized)
    }

    fn build_normalized(&mut self, normalized: Normalized<'_>) -> Result<ArgNode, BuildError> {
        let Normalized { id, label, shape } = normalized;
        let node = match shape {
            Shape::Sum(ctors) => {
                let options = ctors
                    .into_iter()
                    .map(|ctor| self.build_constructor(ctor))
                    .collect::<Result<Vec<_>, _>>()?;
                log::debug!("built dropdown '{label}' with {} options", options.len());
                let field = DropdownField::new(id, label.as_str(), options)
                    .ok_or(BuildError::EmptySumType(label))?;
                ArgNode::Dropdown(field)
            }
            Shape::Bytes(bytes) => {
                log::trace!("bytes field '{label}'");
                ArgNode::Bytes(BytesField::new(id, label, bytes))
            }
            Shape::Int(int) => {
                log::trace!("int field '{label}'");
                ArgNode::Int(IntField::new(id, label, int))
            }
            Shape::Data(text) => {
                log::trace!("data field '{label}'");
                ArgNode::Data(DataField::new(id, label, &text))
            }
        };
        Ok(node)
    }

    fn build_constructor(
        &mut self,
        ctor: NormalizedConstructor<'_>,
    ) -> Result<DropdownOption, BuildError> {
        let fields = ctor
            .fields
            .iter()
            .map(|field| self.build_field(None, field))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DropdownOption::new(ctor.id, ctor.label, ctor.index, fields))
    }
}

/// Builds the tree for one labelled argument.
pub fn build_arg(
    definitions: &Definitions,
    param: &Param,
    options: BuildOptions,
) -> Result<ArgNode, BuildError> {
    Builder::new(definitions, options).build_param(param)
}

/// Builds the tree for a bare schema descriptor.
pub fn build_schema(
    definitions: &Definitions,
    label: Option<&str>,
    desc: &SchemaDescriptor,
    options: BuildOptions,
) -> Result<ArgNode, BuildError> {
    Builder::new(definitions, options).build_field(label, desc)
}
