pub mod config;
pub mod debugger;
pub mod error;
pub mod value;

pub use config::ScriptConfig;
pub use debugger::{Channel, Diagnostics, Printer};
pub use error::{DebugInfo, ResCode};
pub use value::*;
