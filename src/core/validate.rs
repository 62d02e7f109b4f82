use crate::core::table::RateTable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("rates payload is empty")]
    EmptyPayload,

    #[error("base currency code cannot be empty")]
    EmptyBaseCode,

    #[error("no target rates provided for {base}")]
    NoTargets { base: String },

    #[error("target currency code cannot be empty (base {base})")]
    EmptyTargetCode { base: String },

    #[error("invalid rate for {base}->{target}: {rate}")]
    NonPositiveRate {
        base: String,
        target: String,
        rate: f64,
    },
}

/// Checks a candidate table before it is merged into the store.
///
/// Bases and targets are visited in sorted order, so the first failure
/// reported for a given payload is always the same one.
pub fn validate(table: &RateTable) -> Result<(), ValidationError> {
    if table.is_empty() {
        return Err(ValidationError::EmptyPayload);
    }

    for (base, targets) in table.iter() {
        if base.is_empty() {
            return Err(ValidationError::EmptyBaseCode);
        }
        if targets.is_empty() {
            return Err(ValidationError::NoTargets { base: base.clone() });
        }
        for (target, &rate) in targets {
            if target.is_empty() {
                return Err(ValidationError::EmptyTargetCode { base: base.clone() });
            }
            if rate.is_nan() || rate <= 0.0 {
                return Err(ValidationError::NonPositiveRate {
                    base: base.clone(),
                    target: target.clone(),
                    rate,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(json: &str) -> Result<(), ValidationError> {
        let table = RateTable::from_json(json.as_bytes()).expect("test payload must decode");
        validate(&table)
    }

    #[test]
    fn test_accepts_well_formed_table() {
        assert_eq!(check(r#"{"USD":{"EUR":0.92,"GBP":0.78},"EUR":{"USD":1.09}}"#), Ok(()));
    }

    #[test]
    fn test_rejects_empty_payload() {
        assert_eq!(check("{}"), Err(ValidationError::EmptyPayload));
    }

    #[test]
    fn test_rejects_empty_base() {
        assert_eq!(check(r#"{"":{"EUR":1.0}}"#), Err(ValidationError::EmptyBaseCode));
    }

    #[test]
    fn test_rejects_empty_target_set() {
        assert_eq!(
            check(r#"{"USD":{}}"#),
            Err(ValidationError::NoTargets {
                base: "USD".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_empty_target_code() {
        assert_eq!(
            check(r#"{"USD":{"":1.0}}"#),
            Err(ValidationError::EmptyTargetCode {
                base: "USD".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        for json in [r#"{"USD":{"EUR":0}}"#, r#"{"USD":{"EUR":-1}}"#] {
            let err = check(json).unwrap_err();
            assert!(matches!(err, ValidationError::NonPositiveRate { .. }));
            assert!(err.to_string().starts_with("invalid rate for USD->EUR"));
        }
    }

    #[test]
    fn test_empty_base_reported_before_later_problems() {
        // "" sorts ahead of every other code.
        assert_eq!(
            check(r#"{"USD":{"EUR":-1},"":{"EUR":1.0}}"#),
            Err(ValidationError::EmptyBaseCode)
        );
    }
}
