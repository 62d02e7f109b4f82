//! The exchange-rate table shared by both services.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub type TargetRates = BTreeMap<String, f64>;

/// Base currency code -> (target currency code -> rate).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<String, TargetRates>);

/// Why a JSON document could not be read as a [`RateTable`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("expected a JSON object of base currencies")]
    NotAnObject,

    #[error("rates for {base} must be a JSON object")]
    BaseNotAnObject { base: String },

    #[error("rate for {base}->{target} must be a number")]
    WrongLeafType { base: String, target: String },
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let bases = match value {
            // `null` decodes to nothing, same as an absent body.
            Value::Null => return Ok(Self::new()),
            Value::Object(bases) => bases,
            _ => return Err(DecodeError::NotAnObject),
        };

        let mut table = BTreeMap::new();
        for (base, targets) in bases {
            // A `null` sub-map or rate is left for the validator to reject.
            let targets = match targets {
                Value::Object(targets) => targets,
                Value::Null => Default::default(),
                _ => return Err(DecodeError::BaseNotAnObject { base }),
            };
            let mut rates = TargetRates::new();
            for (target, rate) in targets {
                let rate = match rate {
                    Value::Null => 0.0,
                    rate => match rate.as_f64() {
                        Some(rate) => rate,
                        None => return Err(DecodeError::WrongLeafType { base, target }),
                    },
                };
                rates.insert(target, rate);
            }
            table.insert(base, rates);
        }
        Ok(Self(table))
    }

    /// Pretty-printed JSON, as written to the saved snapshot.
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn targets(&self, base: &str) -> Option<&TargetRates> {
        self.0.get(base)
    }

    pub fn rate(&self, base: &str, target: &str) -> Option<f64> {
        self.0.get(base).and_then(|targets| targets.get(target)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TargetRates)> {
        self.0.iter()
    }

    /// Folds `incoming` into `self` leaf by leaf.
    ///
    /// A base missing from `self` is adopted whole. For a known base only the
    /// targets named in `incoming` are overwritten; its other targets stay.
    pub fn merge(mut self, incoming: RateTable) -> RateTable {
        for (base, targets) in incoming.0 {
            self.0.entry(base).or_default().extend(targets);
        }
        self
    }
}

impl From<BTreeMap<String, TargetRates>> for RateTable {
    fn from(map: BTreeMap<String, TargetRates>) -> Self {
        Self(map)
    }
}

impl<B, T, const N: usize, const M: usize> From<[(B, [(T, f64); M]); N]> for RateTable
where
    B: Into<String>,
    T: Into<String>,
{
    fn from(entries: [(B, [(T, f64); M]); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(base, targets)| {
                    (
                        base.into(),
                        targets.into_iter().map(|(t, r)| (t.into(), r)).collect(),
                    )
                })
                .collect(),
        )
    }
}

/// Starter rates written by `fxmicro seed`. Never a runtime fallback.
pub fn seed_rates() -> RateTable {
    let mut table = RateTable::new();
    for (base, targets) in [
        ("USD", vec![("EUR", 0.92), ("GBP", 0.78), ("JPY", 135.33)]),
        ("EUR", vec![("USD", 1.09), ("GBP", 0.85)]),
        ("GBP", vec![("USD", 1.29), ("EUR", 1.17)]),
    ] {
        let targets = targets
            .into_iter()
            .map(|(target, rate)| (target.to_string(), rate))
            .collect();
        table.0.insert(base.to_string(), targets);
    }
    table
}
