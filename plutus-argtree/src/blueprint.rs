/// Contract blueprint documents: the published list of validators with
/// their datum, redeemer, and parameter schemas, plus the shared
/// definitions table those schemas reference.
use crate::builder::{BuildOptions, Builder};
use crate::error::{ArgError, BuildError};
use crate::plutus::PlutusData;
use crate::schema::{Definitions, Param};
use crate::tree::ArgNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preamble {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub plutus_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validator {
    pub title: String,
    pub datum: Option<Param>,
    pub redeemer: Option<Param>,
    #[serde(default)]
    pub parameters: Vec<Param>,
    pub compiled_code: Option<String>,
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Blueprint {
    #[serde(default)]
    pub preamble: Preamble,
    pub validators: Vec<Validator>,
    #[serde(default)]
    pub definitions: Definitions,
}

/// Which argument of a validator to work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Datum,
    Redeemer,
    Parameters,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Datum => "datum",
            Slot::Redeemer => "redeemer",
            Slot::Parameters => "parameters",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "datum" => Ok(Slot::Datum),
            "redeemer" => Ok(Slot::Redeemer),
            "parameters" | "params" => Ok(Slot::Parameters),
            other => Err(format!(
                "unknown slot '{other}', expected datum, redeemer, or parameters"
            )),
        }
    }
}

/// Editable trees for every argument of one validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorArgs {
    pub datum: Option<ArgNode>,
    pub parameters: Vec<ArgNode>,
    pub redeemer: ArgNode,
}

impl ValidatorArgs {
    pub fn parameters_to_plutus(&self) -> Result<Vec<PlutusData>, ArgError> {
        self.parameters.iter().map(ArgNode::to_plutus_val).collect()
    }
}

impl Blueprint {
    pub fn from_json(text: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validator(&self, title: &str) -> Result<&Validator, BuildError> {
        self.validators
            .iter()
            .find(|v| v.title == title)
            .ok_or_else(|| BuildError::UnknownValidator(title.to_string()))
    }

    pub fn validator_args(
        &self,
        title: &str,
        options: BuildOptions,
    ) -> Result<ValidatorArgs, BuildError> {
        let validator = self.validator(title)?;
        let mut builder = Builder::new(&self.definitions, options);
        let redeemer = validator
            .redeemer
            .as_ref()
            .ok_or_else(|| BuildError::MissingSlot {
                validator: title.to_string(),
                slot: Slot::Redeemer.to_string(),
            })?;
        let redeemer = builder.build_param(redeemer)?;
        let datum = validator
            .datum
            .as_ref()
            .map(|d| builder.build_param(d))
            .transpose()?;
        let parameters = validator
            .parameters
            .iter()
            .map(|p| builder.build_param(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ValidatorArgs {
            datum,
            parameters,
            redeemer,
        })
    }

    /// Trees for a single slot. Datum and redeemer yield one tree, the
    /// parameter slot yields one per parameter (possibly none).
    pub fn slot_args(
        &self,
        title: &str,
        slot: Slot,
        options: BuildOptions,
    ) -> Result<Vec<ArgNode>, BuildError> {
        let validator = self.validator(title)?;
        let mut builder = Builder::new(&self.definitions, options);
        let single = match slot {
            Slot::Datum => validator.datum.as_ref(),
            Slot::Redeemer => validator.redeemer.as_ref(),
            Slot::Parameters => {
                return validator
                    .parameters
                    .iter()
                    .map(|p| builder.build_param(p))
                    .collect();
            }
        };
        let param = single.ok_or_else(|| BuildError::MissingSlot {
            validator: title.to_string(),
            slot: slot.to_string(),
        })?;
        Ok(vec![builder.build_param(param)?])
    }
}
