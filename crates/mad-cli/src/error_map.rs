use std::fmt::Display;

use mad_core::{DebugInfo, ResCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub(crate) struct CliError {
    pub(crate) code: String,
    pub(crate) message: String,
}

impl CliError {
    pub(crate) fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<DebugInfo> for CliError {
    fn from(info: DebugInfo) -> Self {
        Self::new(info.code.name(), info.description)
    }
}

fn map_error(code: &'static str, error: impl Display) -> CliError {
    CliError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CliError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    match serde_json::to_string(&error.message) {
        Ok(message) => println!("ERROR_MSG_JSON:{}", message),
        Err(_) => println!("ERROR_MSG_JSON:\"\""),
    }
    1
}

pub(crate) fn map_cli_script_read(error: std::io::Error) -> CliError {
    map_error("CLI_SCRIPT_READ", error)
}

pub(crate) fn map_cli_config_read(error: std::io::Error) -> CliError {
    map_error("CLI_CONFIG_READ", error)
}

pub(crate) fn map_cli_config_invalid(error: serde_json::Error) -> CliError {
    map_error("CLI_CONFIG_INVALID", error)
}

pub(crate) fn map_cli_value_spec(spec: &str, reason: impl Display) -> CliError {
    CliError::new(
        "CLI_VALUE_SPEC",
        format!("Invalid value spec '{}': {}", spec, reason),
    )
}

pub(crate) fn map_call_result(func_name: &str, code: ResCode) -> Result<(), CliError> {
    if code.is_ok() {
        return Ok(());
    }
    Err(CliError::new(
        code.name(),
        format!("Call to '{}' returned {}", func_name, code),
    ))
}
