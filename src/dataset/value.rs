use lazy_static::lazy_static;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

// 2^53
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

lazy_static! {
    static ref NULL_TOKENS: HashSet<&'static str> = [
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
        "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .iter()
    .cloned()
    .collect();
}

/// A single non-null cell.
///
/// Floats keep the field as written, since the same column may hold names
/// (`1e5` is a valid handle) as well as numbers.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64, String),
    Text(String),
}

impl Value {
    /// Parses a raw CSV field, returning `None` for the usual null tokens.
    pub fn parse(field: &str) -> Option<Value> {
        if NULL_TOKENS.contains(field) {
            return None;
        }

        if is_numeric(field) {
            if is_fractional(field) {
                if let Ok(value) = field.parse::<f64>() {
                    return if value.is_nan() {
                        None
                    } else {
                        Some(Value::Float(value, field.to_string()))
                    };
                }
            } else if let Ok(value) = field.parse::<i64>() {
                if value.to_string() == field {
                    return Some(Value::Integer(value));
                }
            }
        }

        // Integers beyond `i64` (and anything else) keep their exact digits.
        Some(Value::Text(field.to_string()))
    }

    /// Interprets the value as a non-negative count.
    ///
    /// Floats are rounded (exports often write `12.0`); negative, infinite and
    /// non-numeric values are not counts.
    pub fn as_count(&self) -> Option<u64> {
        match self {
            Value::Integer(value) if *value >= 0 => Some(*value as u64),
            Value::Float(value, _) if value.is_finite() && *value >= 0.0 => {
                Some(value.round() as u64)
            }
            Value::Text(value) => value.trim().parse::<u64>().ok(),
            _ => None,
        }
    }

    /// A string form suitable for identity comparisons.
    ///
    /// Integral floats that are exactly representable lose their fractional
    /// part, so an id exported as `1234.0` in one file matches `1234` in
    /// another. Any other float keys on its text as written.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Value::Integer(value) => Cow::Owned(value.to_string()),
            Value::Float(value, _) if value.fract() == 0.0 && value.abs() < MAX_EXACT_FLOAT => {
                Cow::Owned(format!("{}", *value as i64))
            }
            Value::Float(_, raw) => Cow::Borrowed(raw),
            Value::Text(value) => Cow::Borrowed(value),
        }
    }

    /// The field exactly as it appeared in the file.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Integer(value) => Cow::Owned(value.to_string()),
            Value::Float(_, raw) => Cow::Borrowed(raw),
            Value::Text(value) => Cow::Borrowed(value),
        }
    }
}

// Digits and float punctuation only, without a leading zero that a number
// would drop (`007`, `-01.5`).
fn is_numeric(field: &str) -> bool {
    let digits = field.trim_start_matches(|c: char| c == '-' || c == '+');
    let bytes = digits.as_bytes();

    !digits.is_empty()
        && field
            .bytes()
            .all(|b| b.is_ascii_digit() || b"+-.eE".contains(&b))
        && !(bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit())
}

fn is_fractional(field: &str) -> bool {
    field.contains(|c: char| c == '.' || c == 'e' || c == 'E')
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        f.write_str(&self.as_text())
    }
}
