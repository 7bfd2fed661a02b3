//! Rhai script host with typed value marshalling, native callbacks and a
//! quick-call cache for hot invocation loops.

mod helpers;
mod host;

pub use host::{
    HostId, NativeTrampoline, QuickCallPack, Script, ScriptOptions, ScriptState,
};
pub use mad_core::{
    Channel, DebugInfo, Diagnostics, ResCode, ScriptConfig, ScriptValue, UserPtr, ValueKind,
};
pub use rhai;
