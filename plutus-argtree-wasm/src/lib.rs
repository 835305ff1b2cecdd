use plutus_argtree::{
    build_schema, ArgError, ArgNode, Blueprint, BuildError, BuildOptions, Definitions,
    SchemaDescriptor, Slot,
};
use wasm_bindgen::prelude::*;

/// One editable argument (datum, redeemer, or parameter) held for a
/// browser form. A pristine copy is kept so the form can be reset.
#[wasm_bindgen]
pub struct ArgForm {
    root: ArgNode,
    pristine: ArgNode,
}

impl ArgForm {
    pub fn new(root: ArgNode) -> Self {
        Self {
            pristine: root.clone(),
            root,
        }
    }

    pub fn root(&self) -> &ArgNode {
        &self.root
    }

    pub fn show_text(&self, id: &str) -> Result<Option<String>, ArgError> {
        Ok(self.root.get_child_by_id(id)?.show_field_val())
    }

    pub fn set_text(&mut self, id: &str, text: &str) -> Result<(), ArgError> {
        self.root.get_child_by_id_mut(id)?.set_field_val(text)
    }

    pub fn plutus_text(&self) -> Result<String, ArgError> {
        Ok(self.root.to_plutus_val()?.to_json_string()?)
    }
}

#[wasm_bindgen]
impl ArgForm {
    /// Builds a form from a definitions table and one schema descriptor.
    #[wasm_bindgen(js_name = fromSchema)]
    pub fn from_schema(
        definitions_json: &str,
        schema_json: &str,
        label: Option<String>,
    ) -> Result<ArgForm, JsError> {
        Ok(ArgForm::new(load_schema(
            definitions_json,
            schema_json,
            label.as_deref(),
        )?))
    }

    /// Builds a form for one slot of a blueprint validator. `position`
    /// picks the parameter and is ignored for datum and redeemer.
    #[wasm_bindgen(js_name = fromBlueprint)]
    pub fn from_blueprint(
        blueprint_json: &str,
        validator: &str,
        slot: &str,
        position: usize,
    ) -> Result<ArgForm, JsError> {
        let slot: Slot = slot.parse().map_err(|e: String| JsError::new(&e))?;
        let root = load_blueprint_slot(blueprint_json, validator, slot, position)?;
        Ok(ArgForm::new(root))
    }

    /// The tree as a plain JS object, tagged by `kind`, for rendering.
    pub fn tree(&self) -> Result<JsValue, JsError> {
        let text = serde_json::to_string(&self.root)?;
        parse_js(&text)
    }

    pub fn show(&self, id: &str) -> Result<Option<String>, JsError> {
        Ok(self.show_text(id)?)
    }

    pub fn set(&mut self, id: &str, text: &str) -> Result<(), JsError> {
        Ok(self.set_text(id, text)?)
    }

    /// The detailed-JSON Plutus data for the current form contents, as a JS
    /// object. Integers beyond 2^53 lose precision as JS numbers; use
    /// `toPlutusJson` when the value goes on to a transaction builder.
    #[wasm_bindgen(js_name = toPlutus)]
    pub fn to_plutus(&self) -> Result<JsValue, JsError> {
        parse_js(&self.plutus_text()?)
    }

    /// The same value as JSON text, every integer digit intact.
    #[wasm_bindgen(js_name = toPlutusJson)]
    pub fn to_plutus_json(&self) -> Result<String, JsError> {
        Ok(self.plutus_text()?)
    }

    /// Discards every edit.
    pub fn reset(&mut self) {
        self.root = self.pristine.clone();
    }
}

fn parse_js(text: &str) -> Result<JsValue, JsError> {
    js_sys::JSON::parse(text).map_err(|_| JsError::new("cannot hand JSON to the page"))
}

fn load_schema(
    definitions_json: &str,
    schema_json: &str,
    label: Option<&str>,
) -> Result<ArgNode, BuildError> {
    let definitions: Definitions = serde_json::from_str(definitions_json)?;
    let schema: SchemaDescriptor = serde_json::from_str(schema_json)?;
    build_schema(&definitions, label, &schema, BuildOptions::default())
}

fn load_blueprint_slot(
    blueprint_json: &str,
    validator: &str,
    slot: Slot,
    position: usize,
) -> Result<ArgNode, BuildError> {
    let blueprint = Blueprint::from_json(blueprint_json)?;
    let mut trees = blueprint.slot_args(validator, slot, BuildOptions::default())?;
    let index = match slot {
        Slot::Parameters => position,
        Slot::Datum | Slot::Redeemer => 0,
    };
    if index >= trees.len() {
        return Err(BuildError::MissingSlot {
            validator: validator.to_string(),
            slot: format!("{slot} #{position}"),
        });
    }
    Ok(trees.swap_remove(index))
}
