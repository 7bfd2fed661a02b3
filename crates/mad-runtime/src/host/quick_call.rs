use mad_core::{ResCode, ScriptValue};
use rhai::{Dynamic, FnPtr};
use tracing::debug;

use super::registry::RegistryKey;
use super::vm::{Resolved, Vm};
use super::{HostId, Script};

/// Precompiled call: a function reference and its arguments, marshalled once
/// and parked in the owning host's registry.
///
/// A pack is tied to one host and one engine generation. It does not keep the
/// host alive; using it after the host was deleted or reloaded is refused.
///
/// Dropping a pack does not free its registry slots. They stay occupied until
/// the pack is passed to [`Script::unregister_quick_call_pack`] or the host is
/// deleted or reloaded, which discards the whole registry.
#[must_use = "a dropped pack keeps its registry slots until unregister, delete or reload"]
#[derive(Debug)]
pub struct QuickCallPack {
    owner: HostId,
    generation: u64,
    func_name: String,
    function: RegistryKey,
    args: Vec<RegistryKey>,
}

impl QuickCallPack {
    pub fn owner(&self) -> HostId {
        self.owner
    }

    pub fn func_name(&self) -> &str {
        &self.func_name
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

impl Script {
    pub fn register_quick_call_pack(
        &mut self,
        func_name: &str,
        args: &[ScriptValue],
    ) -> Option<QuickCallPack> {
        self.ready_vm("register quick call pack")?;
        let arguments = self.marshal_arguments(func_name, args, "register a quick call pack");

        let vm = self.vm.as_mut()?;
        let Resolved::Callable(function) = vm.resolve_function(func_name, &self.callbacks) else {
            self.diagnostics.error(format!(
                "Can't find function: \"{}\" to register quick call pack!",
                func_name
            ));
            return None;
        };

        let function = vm.registry.insert(Dynamic::from(function));
        let args = arguments
            .into_iter()
            .map(|argument| vm.registry.insert(argument))
            .collect();

        debug!(target: "mad", func_name, generation = vm.generation, "quick call pack registered");
        Some(QuickCallPack {
            owner: self.id,
            generation: vm.generation,
            func_name: func_name.to_string(),
            function,
            args,
        })
    }

    /// Invokes a pack, ignoring return values. Packs from another host or from
    /// an earlier engine generation are rejected with `IllegalCall`.
    pub fn quick_call(&self, pack: &QuickCallPack) -> ResCode {
        let Some(vm) = self.pack_vm(pack, "run") else {
            return ResCode::IllegalCall;
        };

        let Some(function) = vm
            .registry
            .get(pack.function)
            .and_then(|value| value.clone().try_cast::<FnPtr>())
        else {
            self.diagnostics.error(format!(
                "Quick call pack lost its function reference, pack func name: \"{}\"",
                pack.func_name
            ));
            return ResCode::FunctionNotFound;
        };
        let arguments = pack
            .args
            .iter()
            .map(|key| vm.registry.get(*key).cloned().unwrap_or(Dynamic::UNIT))
            .collect();

        match vm.call(&function, arguments) {
            Ok(_) => ResCode::Ok,
            Err(error) => {
                self.diagnostics
                    .error(format!("Quick call failed, script error: {}", error));
                ResCode::FunctionFailed
            }
        }
    }

    /// Frees the pack's registry slots. A rejected pack is handed back as is.
    pub fn unregister_quick_call_pack(&mut self, pack: QuickCallPack) -> Result<(), QuickCallPack> {
        if self.pack_vm(&pack, "unregister").is_none() {
            return Err(pack);
        }
        if let Some(vm) = self.vm.as_mut() {
            debug!(target: "mad", func_name = %pack.func_name, "quick call pack unregistered");
            vm.registry.remove(pack.function);
            for key in &pack.args {
                vm.registry.remove(*key);
            }
        }
        Ok(())
    }

    fn pack_vm(&self, pack: &QuickCallPack, action: &str) -> Option<&Vm> {
        if pack.owner != self.id {
            self.diagnostics.error(format!(
                "Try to {} a quick call pack on a different script VM, pack func name: \"{}\"",
                action, pack.func_name
            ));
            return None;
        }
        let Some(vm) = self.vm.as_ref() else {
            self.diagnostics.error(format!(
                "Try to {} a quick call pack on a deleted script, pack func name: \"{}\"",
                action, pack.func_name
            ));
            return None;
        };
        if vm.generation != pack.generation {
            self.diagnostics.error(format!(
                "Try to {} a stale quick call pack from before a reload, pack func name: \"{}\"",
                action, pack.func_name
            ));
            return None;
        }
        Some(vm)
    }
}
