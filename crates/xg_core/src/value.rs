//! Typed option values (spec §3 "Option") and their CLI/value conversions.
//!
//! Grounded on `original_source/PhdTester/phdTester/option_types.py`, whose
//! ten value kinds are carried over unchanged; where the Python source used
//! a dynamically-typed `Any`, we use this closed sum type so conversion is a
//! total, exhaustively-matched function instead of a runtime type check.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::OptionError;

/// The declared type of an [`crate::option::OptionDef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    Int,
    Float,
    Bool,
    Str,
    IntList,
    FloatList,
    BoolList,
    StrList,
    PercentageInt,
    PercentageIntList,
}

impl ValueType {
    /// True for the `*List` variants (UNDER_TEST/ENVIRONMENT options range over these).
    pub fn is_list(self) -> bool {
        matches!(
            self,
            ValueType::IntList
                | ValueType::FloatList
                | ValueType::BoolList
                | ValueType::StrList
                | ValueType::PercentageIntList
        )
    }

    fn name(self) -> &'static str {
        match self {
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::Bool => "Bool",
            ValueType::Str => "Str",
            ValueType::IntList => "IntList",
            ValueType::FloatList => "FloatList",
            ValueType::BoolList => "BoolList",
            ValueType::StrList => "StrList",
            ValueType::PercentageInt => "PercentageInt",
            ValueType::PercentageIntList => "PercentageIntList",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete value carried by an option. `None` (the "null" state) is
/// represented *outside* this type, as `Option<OptionValue>`, per spec §3.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    BoolList(Vec<bool>),
    StrList(Vec<String>),
    /// 0..=100, inclusive.
    PercentageInt(u8),
    PercentageIntList(Vec<u8>),
}

impl OptionValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            OptionValue::Int(_) => ValueType::Int,
            OptionValue::Float(_) => ValueType::Float,
            OptionValue::Bool(_) => ValueType::Bool,
            OptionValue::Str(_) => ValueType::Str,
            OptionValue::IntList(_) => ValueType::IntList,
            OptionValue::FloatList(_) => ValueType::FloatList,
            OptionValue::BoolList(_) => ValueType::BoolList,
            OptionValue::StrList(_) => ValueType::StrList,
            OptionValue::PercentageInt(_) => ValueType::PercentageInt,
            OptionValue::PercentageIntList(_) => ValueType::PercentageIntList,
        }
    }

    /// Parse a single scalar token (one element of a CLI/config value list)
    /// into the declared type. Mirrors `IOptionNode.convert_value` from
    /// `original_source/PhdTester/phdTester/model_interfaces.py`, which is
    /// called once per element of a parsed list-literal.
    pub fn parse_scalar(name: &str, raw: &str, ty: ValueType) -> Result<OptionValue, OptionError> {
        let conv_err = || OptionError::OptionConversion {
            name: name.to_string(),
            raw: raw.to_string(),
            expected: ty.name(),
        };
        match ty {
            ValueType::Int | ValueType::IntList => {
                raw.trim().parse::<i64>().map(OptionValue::Int).map_err(|_| conv_err())
            }
            ValueType::Float | ValueType::FloatList => {
                raw.trim().parse::<f64>().map(OptionValue::Float).map_err(|_| conv_err())
            }
            ValueType::Bool | ValueType::BoolList => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(OptionValue::Bool(true)),
                "false" | "0" | "no" => Ok(OptionValue::Bool(false)),
                _ => Err(conv_err()),
            },
            ValueType::Str | ValueType::StrList => Ok(OptionValue::Str(raw.to_string())),
            ValueType::PercentageInt | ValueType::PercentageIntList => {
                let n: u32 = raw.trim().trim_end_matches('%').parse().map_err(|_| conv_err())?;
                if n > 100 {
                    return Err(conv_err());
                }
                Ok(OptionValue::PercentageInt(n as u8))
            }
        }
    }

    /// Parse one CLI flag's string into the *list* of values a UNDER_TEST /
    /// ENVIRONMENT option ranges over (spec §6: "the list-literal syntax is
    /// delegated to the evaluator"). Accepts `a,b,c` or `[a, b, c]`.
    pub fn parse_list(name: &str, raw: &str, ty: ValueType) -> Result<Vec<OptionValue>, OptionError> {
        let inner = raw.trim();
        let inner = inner
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(inner);
        if inner.trim().is_empty() {
            return Ok(Vec::new());
        }
        inner
            .split(',')
            .map(|tok| OptionValue::parse_scalar(name, tok.trim(), ty))
            .collect()
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Float(v) => write!(f, "{v}"),
            OptionValue::Bool(v) => write!(f, "{v}"),
            OptionValue::Str(v) => write!(f, "{v}"),
            OptionValue::IntList(v) => write!(f, "[{}]", join(v)),
            OptionValue::FloatList(v) => write!(f, "[{}]", join(v)),
            OptionValue::BoolList(v) => write!(f, "[{}]", join(v)),
            OptionValue::StrList(v) => write!(f, "[{}]", v.join(", ")),
            OptionValue::PercentageInt(v) => write!(f, "{v}%"),
            OptionValue::PercentageIntList(v) => write!(f, "[{}]", join(v)),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", ")
}

// `OptionValue` is used as a dedup key (spec §4.4 "deduplicated ... with
// equality over the pruned bundle"); provide a structural Hash so bundles
// can be hashed for fast dedup ahead of the linear tie-break compare.
impl Eq for OptionValue {}

impl Hash for OptionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            OptionValue::Int(v) => v.hash(state),
            OptionValue::Float(v) => v.to_bits().hash(state),
            OptionValue::Bool(v) => v.hash(state),
            OptionValue::Str(v) => v.hash(state),
            OptionValue::IntList(v) => v.hash(state),
            OptionValue::FloatList(v) => v.iter().for_each(|x| x.to_bits().hash(state)),
            OptionValue::BoolList(v) => v.hash(state),
            OptionValue::StrList(v) => v.hash(state),
            OptionValue::PercentageInt(v) => v.hash(state),
            OptionValue::PercentageIntList(v) => v.hash(state),
        }
    }
}
