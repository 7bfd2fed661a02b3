use mad_core::{ResCode, ScriptValue, UserPtr, ValueKind};
use rhai::{Dynamic, ParseErrorType, FLOAT, INT};

pub(crate) fn classify_dynamic(value: &Dynamic) -> ValueKind {
    let value = value.clone().flatten();
    if value.is_unit() {
        ValueKind::Nil
    } else if value.is_bool() {
        ValueKind::Boolean
    } else if value.is_int() {
        ValueKind::Integer
    } else if value.is_float() {
        ValueKind::Number
    } else if value.is_string() {
        ValueKind::String
    } else if value.is::<UserPtr>() {
        ValueKind::Pointer
    } else {
        ValueKind::Unknown
    }
}

pub(crate) fn value_to_dynamic(value: &ScriptValue) -> Dynamic {
    match value {
        ScriptValue::Nil | ScriptValue::Unknown => Dynamic::UNIT,
        ScriptValue::Boolean(value) => Dynamic::from_bool(*value),
        ScriptValue::Integer(value) => Dynamic::from_int(*value as INT),
        ScriptValue::Number(value) => Dynamic::from_float(*value as FLOAT),
        ScriptValue::String(value) => Dynamic::from(value.clone()),
        ScriptValue::Pointer(value) => Dynamic::from(*value),
    }
}

pub(crate) fn dynamic_as_integer(value: &Dynamic) -> Option<i64> {
    value.as_int().ok().map(|value| value as i64)
}

pub(crate) fn dynamic_as_number(value: &Dynamic) -> Option<f64> {
    if let Ok(value) = value.as_float() {
        return Some(value as f64);
    }
    value.as_int().ok().map(|value| value as f64)
}

/// Strings read as-is; numbers are accepted and rendered as text.
pub(crate) fn dynamic_as_string(value: &Dynamic) -> Option<String> {
    if value.is_string() {
        return value.clone().into_string().ok();
    }
    if let Ok(value) = value.as_int() {
        return Some(value.to_string());
    }
    if let Ok(value) = value.as_float() {
        return Some(format!("{value:?}"));
    }
    None
}

pub(crate) fn dynamic_as_bool(value: &Dynamic) -> Option<bool> {
    value.as_bool().ok()
}

pub(crate) fn dynamic_as_pointer(value: &Dynamic) -> Option<UserPtr> {
    value.clone().try_cast::<UserPtr>()
}

/// Boxes a value returned from an invoked function. Every number comes back as
/// `Number`, integral or not.
pub(crate) fn return_to_value(value: Dynamic) -> ScriptValue {
    let value = value.flatten();
    match classify_dynamic(&value) {
        ValueKind::Nil => ScriptValue::Nil,
        ValueKind::Boolean => dynamic_as_bool(&value)
            .map(ScriptValue::Boolean)
            .unwrap_or(ScriptValue::Unknown),
        ValueKind::Integer | ValueKind::Number => dynamic_as_number(&value)
            .map(ScriptValue::Number)
            .unwrap_or(ScriptValue::Unknown),
        ValueKind::String => value
            .into_string()
            .map(ScriptValue::String)
            .unwrap_or(ScriptValue::Unknown),
        ValueKind::Pointer => dynamic_as_pointer(&value)
            .map(ScriptValue::Pointer)
            .unwrap_or(ScriptValue::Unknown),
        ValueKind::Unknown => ScriptValue::Unknown,
    }
}

/// Unit yields nothing and an array yields one value per element, which is how
/// a script function hands back several results.
pub(crate) fn spread_returns(result: Dynamic) -> Vec<Dynamic> {
    let result = result.flatten();
    if result.is_unit() {
        return Vec::new();
    }
    if result.is_array() {
        return result.into_array().unwrap_or_default();
    }
    vec![result]
}

pub(crate) fn classify_parse_error(error: &ParseErrorType) -> ResCode {
    match error {
        ParseErrorType::ExprTooDeep | ParseErrorType::LiteralTooLarge(..) => {
            ResCode::MemoryExhausted
        }
        _ => ResCode::SyntaxError,
    }
}
