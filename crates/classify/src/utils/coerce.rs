use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Param;
use serde_json::{Map, Number, Value};
use sift_common::utils::strings::encode_hex;
use std::collections::HashSet;

/// The widest integer type coerced into a native JSON number. Wider integers
/// are rendered as decimal strings, so consumers that read JSON numbers as
/// doubles never lose precision. The threshold is a compatibility default,
/// not a domain constant; [`coerce_value`] takes it as a parameter.
pub const DEFAULT_NUMERIC_WIDTH: usize = 48;

/// Converts a decoded value into its JSON representation.
///
/// Integer types of at most `numeric_width` bits become native numbers;
/// wider integers become decimal strings. Addresses are checksummed, byte
/// values are 0x-prefixed lowercase hex, arrays and tuples recurse.
pub(crate) fn coerce_value(value: &DynSolValue, numeric_width: usize) -> Value {
    match value {
        DynSolValue::Address(address) => Value::String(address.to_string()),
        DynSolValue::Function(function) => {
            Value::String(format!("0x{}", encode_hex(function.as_slice())))
        }
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::String(s) => Value::String(s.to_owned()),
        DynSolValue::Bytes(bytes) => Value::String(format!("0x{}", encode_hex(bytes))),
        DynSolValue::FixedBytes(word, size) => {
            Value::String(format!("0x{}", encode_hex(&word[..*size])))
        }
        DynSolValue::Uint(u, bits) => {
            if *bits <= numeric_width {
                u64::try_from(*u)
                    .map(|n| Value::Number(Number::from(n)))
                    .unwrap_or_else(|_| Value::String(u.to_string()))
            } else {
                Value::String(u.to_string())
            }
        }
        DynSolValue::Int(i, bits) => {
            if *bits <= numeric_width {
                i64::try_from(*i)
                    .map(|n| Value::Number(Number::from(n)))
                    .unwrap_or_else(|_| Value::String(i.to_string()))
            } else {
                Value::String(i.to_string())
            }
        }
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) |
        DynSolValue::Tuple(values) => {
            Value::Array(values.iter().map(|value| coerce_value(value, numeric_width)).collect())
        }
        // `CustomStruct` only exists behind the eip712 feature; its
        // components coerce like a tuple.
        #[allow(unreachable_patterns)]
        other => Value::Array(
            other
                .as_tuple()
                .unwrap_or_default()
                .iter()
                .map(|value| coerce_value(value, numeric_width))
                .collect(),
        ),
    }
}

/// Builds the argument mapping for a decoded call, choosing a single
/// addressing scheme: parameter names when every parameter declares a unique
/// name, positional indices for ALL arguments otherwise. The two schemes are
/// never mixed.
pub(crate) fn reconcile_arguments(
    params: &[Param],
    values: &[DynSolValue],
    numeric_width: usize,
) -> Map<String, Value> {
    let named = params
        .iter()
        .filter(|param| !param.name.is_empty())
        .map(|param| param.name.as_str())
        .collect::<HashSet<_>>();
    let all_named = named.len() == params.len();

    let mut inputs = Map::new();
    for (index, (param, value)) in params.iter().zip(values.iter()).enumerate() {
        let key = if all_named { param.name.clone() } else { index.to_string() };
        inputs.insert(key, coerce_value(value, numeric_width));
    }

    inputs
}
