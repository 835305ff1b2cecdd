/// The editable argument tree handed to the UI.
///
/// Topology (variants, children, constructor ordinals) is fixed when a
/// tree is built. Afterwards only leaf contents and dropdown selections
/// change, and every edit is local to the node it addresses.
use crate::error::ArgError;
use crate::plutus::PlutusData;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable node identity, unique within a tree and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Only the canonical form produced by `Display` (lower-case, hyphenated)
/// names a node. Other spellings of the same UUID are rejected.
impl FromStr for NodeId {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .ok()
            .filter(|uuid| uuid.hyphenated().to_string() == s)
            .map(Self)
            .ok_or_else(|| ArgError::UnknownId(s.to_string()))
    }
}

/// Variant tag, for callers that only need to know what to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Bytes,
    Int,
    Data,
    Dropdown,
    Option,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BytesField {
    id: NodeId,
    label: String,
    bytes: String,
}

impl BytesField {
    pub fn new(id: NodeId, label: impl Into<String>, bytes: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &str {
        &self.bytes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntField {
    id: NodeId,
    label: String,
    int: i128,
}

impl IntField {
    pub fn new(id: NodeId, label: impl Into<String>, int: i128) -> Self {
        Self {
            id,
            label: label.into(),
            int,
        }
    }

    pub fn int(&self) -> i128 {
        self.int
    }

    /// Leaves the current value untouched when `text` is not an integer.
    pub fn set_field_val(&mut self, text: &str) -> Result<(), ArgError> {
        let trimmed = text.trim();
        self.int = trimmed.parse::<i128>().map_err(|source| ArgError::Parse {
            text: text.to_string(),
            source,
        })?;
        Ok(())
    }
}

/// Free-form structured value. `text`, `parsed` and `valid` always move
/// together: either `parsed` holds the value and `text` its canonical
/// form, or `parsed` is empty, `valid` is false and `text` is the raw edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataField {
    id: NodeId,
    label: String,
    text: String,
    #[serde(skip)]
    parsed: Option<Value>,
    valid: bool,
}

impl DataField {
    pub fn new(id: NodeId, label: impl Into<String>, text: &str) -> Self {
        let mut field = Self {
            id,
            label: label.into(),
            text: String::new(),
            parsed: None,
            valid: false,
        };
        field.set_field_val(text);
        field
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn parsed(&self) -> Option<&Value> {
        self.parsed.as_ref()
    }

    pub fn set_field_val(&mut self, text: &str) {
        match serde_json::from_str::<Value>(text) {
            Ok(value) if value.is_object() => {
                self.text = format!("{value:#}");
                self.parsed = Some(value);
                self.valid = true;
            }
            _ => {
                log::debug!("data field '{}' holds invalid text", self.label);
                self.text = text.to_string();
                self.parsed = None;
                self.valid = false;
            }
        }
    }

    pub fn to_plutus_val(&self) -> Result<PlutusData, ArgError> {
        match (&self.parsed, self.valid) {
            (Some(value), true) => Ok(PlutusData::Raw(value.clone())),
            _ => Err(ArgError::InvalidData {
                id: self.id,
                label: self.label.clone(),
            }),
        }
    }
}

/// A sum type: one option per constructor, exactly one selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownField {
    id: NodeId,
    label: String,
    selection: NodeId,
    options: Vec<ArgNode>,
}

impl DropdownField {
    /// Selects the first option. Returns `None` when there are no options,
    /// since a dropdown must always have a selection.
    pub fn new(id: NodeId, label: impl Into<String>, options: Vec<DropdownOption>) -> Option<Self> {
        let selection = options.first()?.id;
        Some(Self {
            id,
            label: label.into(),
            selection,
            options: options.into_iter().map(ArgNode::Option).collect(),
        })
    }

    pub fn selection(&self) -> NodeId {
        self.selection
    }

    pub fn options(&self) -> &[ArgNode] {
        &self.options
    }

    /// Only identities of direct options are accepted.
    pub fn select(&mut self, selection: NodeId) -> Result<(), ArgError> {
        if !self.options.iter().any(|o| o.id() == selection) {
            return Err(ArgError::InvalidSelection {
                id: self.id,
                label: self.label.clone(),
                selection: selection.to_string(),
            });
        }
        self.selection = selection;
        Ok(())
    }

    pub fn set_field_val(&mut self, text: &str) -> Result<(), ArgError> {
        let selection = text
            .parse::<NodeId>()
            .map_err(|_| ArgError::InvalidSelection {
                id: self.id,
                label: self.label.clone(),
                selection: text.to_string(),
            })?;
        self.select(selection)
    }

    pub fn selected(&self) -> Result<&ArgNode, ArgError> {
        self.options
            .iter()
            .find_map(|o| o.find(self.selection))
            .ok_or_else(|| ArgError::InvalidSelection {
                id: self.id,
                label: self.label.clone(),
                selection: self.selection.to_string(),
            })
    }
}

/// One constructor of a sum type, with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    id: NodeId,
    label: String,
    constructor: u64,
    fields: Vec<ArgNode>,
}

impl DropdownOption {
    pub fn new(id: NodeId, label: impl Into<String>, constructor: u64, fields: Vec<ArgNode>) -> Self {
        Self {
            id,
            label: label.into(),
            constructor,
            fields,
        }
    }

    pub fn constructor(&self) -> u64 {
        self.constructor
    }

    pub fn fields(&self) -> &[ArgNode] {
        &self.fields
    }
}

/// One node of an argument tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArgNode {
    Bytes(BytesField),
    Int(IntField),
    Data(DataField),
    Dropdown(DropdownField),
    Option(DropdownOption),
}

impl ArgNode {
    pub fn id(&self) -> NodeId {
        match self {
            ArgNode::Bytes(f) => f.id,
            ArgNode::Int(f) => f.id,
            ArgNode::Data(f) => f.id,
            ArgNode::Dropdown(f) => f.id,
            ArgNode::Option(o) => o.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ArgNode::Bytes(f) => &f.label,
            ArgNode::Int(f) => &f.label,
            ArgNode::Data(f) => &f.label,
            ArgNode::Dropdown(f) => &f.label,
            ArgNode::Option(o) => &o.label,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            ArgNode::Bytes(_) => NodeKind::Bytes,
            ArgNode::Int(_) => NodeKind::Int,
            ArgNode::Data(_) => NodeKind::Data,
            ArgNode::Dropdown(_) => NodeKind::Dropdown,
            ArgNode::Option(_) => NodeKind::Option,
        }
    }

    /// Input hint for leaf fields.
    pub fn hint_text(&self) -> Option<&'static str> {
        match self {
            ArgNode::Bytes(_) => Some("bytes"),
            ArgNode::Int(_) => Some("int"),
            ArgNode::Data(_) => Some("data"),
            ArgNode::Dropdown(_) | ArgNode::Option(_) => None,
        }
    }

    pub fn children(&self) -> &[ArgNode] {
        match self {
            ArgNode::Dropdown(f) => &f.options,
            ArgNode::Option(o) => &o.fields,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> &mut [ArgNode] {
        match self {
            ArgNode::Dropdown(f) => &mut f.options,
            ArgNode::Option(o) => &mut o.fields,
            _ => &mut [],
        }
    }

    /// Depth-first, self first.
    pub fn find(&self, id: NodeId) -> Option<&ArgNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut ArgNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children_mut().iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Looks up this node or a descendant by the textual form of its identity.
    pub fn get_child_by_id(&self, id: &str) -> Result<&ArgNode, ArgError> {
        let target = id.parse::<NodeId>()?;
        self.find(target)
            .ok_or_else(|| ArgError::UnknownId(id.to_string()))
    }

    pub fn get_child_by_id_mut(&mut self, id: &str) -> Result<&mut ArgNode, ArgError> {
        let target = id.parse::<NodeId>()?;
        self.find_mut(target)
            .ok_or_else(|| ArgError::UnknownId(id.to_string()))
    }

    /// All nodes of the subtree in depth-first pre-order.
    pub fn descendants(&self) -> Vec<&ArgNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// Current content as text. Dropdowns show their selected option's
    /// identity; options have no content of their own.
    pub fn show_field_val(&self) -> Option<String> {
        match self {
            ArgNode::Bytes(f) => Some(f.bytes.clone()),
            ArgNode::Int(f) => Some(f.int.to_string()),
            ArgNode::Data(f) => Some(f.text.clone()),
            ArgNode::Dropdown(f) => Some(f.selection.to_string()),
            ArgNode::Option(_) => None,
        }
    }

    pub fn set_field_val(&mut self, text: &str) -> Result<(), ArgError> {
        match self {
            ArgNode::Bytes(f) => {
                f.bytes = text.to_string();
                Ok(())
            }
            ArgNode::Int(f) => f.set_field_val(text),
            ArgNode::Data(f) => {
                f.set_field_val(text);
                Ok(())
            }
            ArgNode::Dropdown(f) => f.set_field_val(text),
            ArgNode::Option(o) => Err(ArgError::NotEditable(o.label.clone())),
        }
    }

    /// Reduces the subtree to a structured value, stopping at the first
    /// node (depth-first, left to right) that cannot be serialized.
    pub fn to_plutus_val(&self) -> Result<PlutusData, ArgError> {
        match self {
            ArgNode::Bytes(f) => Ok(PlutusData::bytes(f.bytes.as_str())),
            ArgNode::Int(f) => Ok(PlutusData::int(f.int)),
            ArgNode::Data(f) => f.to_plutus_val(),
            ArgNode::Dropdown(f) => f.selected()?.to_plutus_val(),
            ArgNode::Option(o) => {
                let fields = o
                    .fields
                    .iter()
                    .map(ArgNode::to_plutus_val)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PlutusData::constr(o.constructor, fields))
            }
        }
    }
}

/// Independent copy of a list of trees, identities included. Used to keep
/// pristine defaults next to an edited copy.
pub fn deep_copy(trees: &[ArgNode]) -> Vec<ArgNode> {
    trees.to_vec()
}
