use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result codes shared by every fallible host operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResCode {
    Unknown,
    Ok,
    SyntaxError,
    MemoryExhausted,
    IllegalCall,
    FunctionNotFound,
    FunctionFailed,
}

impl ResCode {
    /// Stable numeric form, `-1` for unknown and `0` for success.
    pub fn code(self) -> i32 {
        match self {
            Self::Unknown => -1,
            Self::Ok => 0,
            Self::SyntaxError => 1,
            Self::MemoryExhausted => 2,
            Self::IllegalCall => 3,
            Self::FunctionNotFound => 4,
            Self::FunctionFailed => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Ok => "OK",
            Self::SyntaxError => "SYNTAX_ERROR",
            Self::MemoryExhausted => "MEM_OUT",
            Self::IllegalCall => "ILLEGAL_CALL",
            Self::FunctionNotFound => "FUNC_NOT_FOUND",
            Self::FunctionFailed => "FUNC_FAILED",
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for ResCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Heavy diagnostic: a result code plus the human readable description that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{}: {}", .code.code(), .description)]
pub struct DebugInfo {
    pub code: ResCode,
    pub description: String,
}

impl DebugInfo {
    pub fn new(code: ResCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    pub fn ok() -> Self {
        Self::from(ResCode::Ok)
    }

    pub fn is_ok(&self) -> bool {
        self.code.is_ok()
    }
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self::from(ResCode::Unknown)
    }
}

impl From<ResCode> for DebugInfo {
    fn from(code: ResCode) -> Self {
        Self::new(code, "NULL")
    }
}

impl From<&DebugInfo> for ResCode {
    fn from(info: &DebugInfo) -> Self {
        info.code
    }
}

impl From<&DebugInfo> for bool {
    fn from(info: &DebugInfo) -> Self {
        info.is_ok()
    }
}
