use std::collections::BTreeMap;

use mad_core::{Diagnostics, ScriptConfig};
use rhai::{Dynamic, EvalAltResult, NativeCallContext};

mod builtins;
mod callbacks;
mod invoke;
mod lifecycle;
mod quick_call;
mod registry;
mod values;
mod vm;

pub use quick_call::QuickCallPack;

use vm::Vm;

/// Native function callable from scripts. It receives the raw call context and
/// arguments and marshals both directions itself.
pub type NativeTrampoline =
    fn(NativeCallContext<'_>, &mut [&mut Dynamic]) -> Result<Dynamic, Box<EvalAltResult>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptState {
    Deleted,
    Loaded,
    Ready,
}

/// Process-unique identity of a [`Script`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(u64);

#[derive(Debug, Clone, Default)]
pub struct ScriptOptions {
    pub config: ScriptConfig,
    pub diagnostics: Diagnostics,
}

/// Owns one Rhai engine instance and tracks its lifecycle.
///
/// Built only through [`Script::create`]. Every operation runs to completion
/// on the calling thread; a host is not meant to be shared between threads.
pub struct Script {
    id: HostId,
    source: String,
    state: ScriptState,
    vm: Option<Vm>,
    generation: u64,
    config: ScriptConfig,
    diagnostics: Diagnostics,
    callbacks: BTreeMap<String, NativeTrampoline>,
}

impl Script {
    /// Returns the engine when the host is ready, logging why it is not
    /// otherwise. `action` completes "Attempt to ... from a deleted script".
    fn ready_vm(&self, action: &str) -> Option<&Vm> {
        match self.state {
            ScriptState::Ready => self.vm.as_ref(),
            ScriptState::Deleted => {
                self.diagnostics
                    .error(format!("Attempt to {} from a deleted script!", action));
                None
            }
            ScriptState::Loaded => {
                self.diagnostics.error(format!(
                    "Attempt to {} from a script without init, please run it first!",
                    action
                ));
                None
            }
        }
    }
}


#[cfg(test)]
mod values_tests;
