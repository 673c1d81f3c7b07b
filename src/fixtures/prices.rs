//! Price Fixtures

use serde_norway::Value;

use crate::{
    fixtures::FixtureError,
    prices::{Price, PriceError},
    pricing::parse_amount,
};

/// Parse a YAML price node.
///
/// Accepts either a string such as `"10.00 USD, 9.00 EUR"` or a mapping of
/// currency code to decimal amount.
///
/// # Errors
///
/// - [`PriceError::InvalidPriceType`]: the node, a key or an amount has the wrong YAML kind.
/// - [`PriceError::InvalidAmount`]: an amount is not a decimal number.
/// - [`PriceError::EmptyPriceMap`]: the mapping has no currencies.
pub fn parse_price(value: &Value) -> Result<Price, FixtureError> {
    match value {
        Value::String(s) => Ok(s.parse()?),
        Value::Mapping(mapping) => {
            let entries = mapping
                .iter()
                .map(|(code, amount)| {
                    let Value::String(code) = code else {
                        return Err(invalid_type(code));
                    };

                    let amount = match amount {
                        Value::Number(number) => parse_amount(&number.to_string())?,
                        Value::String(s) => parse_amount(s)?,
                        other => return Err(invalid_type(other)),
                    };

                    Ok((code.as_str(), amount))
                })
                .collect::<Result<Vec<_>, PriceError>>()?;

            Ok(Price::from_decimal(entries)?)
        }
        other => Err(invalid_type(other).into()),
    }
}

fn invalid_type(value: &Value) -> PriceError {
    PriceError::InvalidPriceType {
        found: value_kind(value),
    }
}

/// Name of a YAML value's kind, for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
