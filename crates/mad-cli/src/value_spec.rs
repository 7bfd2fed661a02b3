use mad_core::ScriptValue;

use crate::{map_cli_value_spec, CliError};

/// Parses `nil`, `int:<i64>`, `num:<f64>`, `str:<text>` or `bool:<true|false>`.
pub(crate) fn parse_value_spec(spec: &str) -> Result<ScriptValue, CliError> {
    if spec == "nil" {
        return Ok(ScriptValue::Nil);
    }
    let Some((kind, raw)) = spec.split_once(':') else {
        return Err(map_cli_value_spec(spec, "expected kind:value"));
    };
    match kind {
        "int" => raw
            .parse::<i64>()
            .map(ScriptValue::Integer)
            .map_err(|error| map_cli_value_spec(spec, error)),
        "num" => raw
            .parse::<f64>()
            .map(ScriptValue::Number)
            .map_err(|error| map_cli_value_spec(spec, error)),
        "bool" => raw
            .parse::<bool>()
            .map(ScriptValue::Boolean)
            .map_err(|error| map_cli_value_spec(spec, error)),
        "str" => Ok(ScriptValue::String(raw.to_string())),
        other => Err(map_cli_value_spec(
            spec,
            format!("unknown kind '{}'", other),
        )),
    }
}

/// Parses `name=kind:value` for a global binding.
pub(crate) fn parse_binding(spec: &str) -> Result<(String, ScriptValue), CliError> {
    let Some((name, value)) = spec.split_once('=') else {
        return Err(map_cli_value_spec(spec, "expected name=kind:value"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(map_cli_value_spec(spec, "missing global name"));
    }
    Ok((name.to_string(), parse_value_spec(value)?))
}

/// Parses `name=len` for a host number buffer.
pub(crate) fn parse_buffer(spec: &str) -> Result<(String, usize), CliError> {
    let Some((name, len)) = spec.split_once('=') else {
        return Err(map_cli_value_spec(spec, "expected name=len"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(map_cli_value_spec(spec, "missing buffer name"));
    }
    match len.trim().parse::<usize>() {
        Ok(0) => Err(map_cli_value_spec(spec, "buffer length must be positive")),
        Ok(len) => Ok((name.to_string(), len)),
        Err(error) => Err(map_cli_value_spec(spec, error)),
    }
}

/// Renders a value for `RETURN:` and `VALUE:` lines.
pub(crate) fn render_value(value: &ScriptValue) -> String {
    match value {
        ScriptValue::String(text) => {
            serde_json::to_string(text).unwrap_or_else(|_| format!("{:?}", text))
        }
        other => other.to_string(),
    }
}
