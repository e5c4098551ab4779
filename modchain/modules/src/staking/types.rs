use std::collections::BTreeSet;

use serde_derive::{Deserialize, Serialize};
use tendermint::block::Header;

use super::error::Error;
use crate::types::ValidatorUpdate;

pub const DEFAULT_HISTORICAL_ENTRIES: u32 = 10_000;
pub const DEFAULT_MAX_VALIDATORS: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub operator_address: String,
    /// hex-encoded consensus public key
    pub consensus_pubkey: String,
    pub power: u64,
}

impl Validator {
    pub fn to_update(&self) -> ValidatorUpdate {
        ValidatorUpdate {
            pub_key: self.consensus_pubkey.clone(),
            power: self.power,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: String| Error::InvalidGenesis { reason };

        if self.operator_address.is_empty() {
            return Err(invalid("validator with empty operator address".to_owned()));
        }
        if self.power == 0 {
            return Err(invalid(format!(
                "validator {} has zero power",
                self.operator_address
            )));
        }
        match hex::decode(&self.consensus_pubkey) {
            Ok(key) if !key.is_empty() => Ok(()),
            _ => Err(invalid(format!(
                "validator {} has an invalid consensus key",
                self.operator_address
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Number of recent heights whose historical info is kept
    pub historical_entries: u32,
    pub max_validators: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            historical_entries: DEFAULT_HISTORICAL_ENTRIES,
            max_validators: DEFAULT_MAX_VALIDATORS,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_validators == 0 {
            return Err(Error::InvalidParams {
                reason: "max validators must be positive".to_owned(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingGenesis {
    pub params: Params,
    pub validators: Vec<Validator>,
}

impl StakingGenesis {
    pub fn validate(&self) -> Result<(), Error> {
        self.params.validate()?;

        if self.validators.len() > self.params.max_validators as usize {
            return Err(Error::InvalidGenesis {
                reason: format!(
                    "{} validators exceed the maximum of {}",
                    self.validators.len(),
                    self.params.max_validators
                ),
            });
        }

        let mut operators = BTreeSet::new();
        for validator in &self.validators {
            validator.validate()?;
            if !operators.insert(validator.operator_address.as_str()) {
                return Err(Error::InvalidGenesis {
                    reason: format!("duplicate validator {}", validator.operator_address),
                });
            }
        }
        Ok(())
    }
}

/// The header of a block and the validator set that was active while it was executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalInfo {
    pub header: Header,
    pub valset: Vec<Validator>,
}

impl HistoricalInfo {
    /// Creates the entry with `valset` sorted by operator address.
    pub fn new(header: Header, mut valset: Vec<Validator>) -> Self {
        valset.sort_by(|a, b| a.operator_address.cmp(&b.operator_address));
        Self { header, valset }
    }
}
