use std::any::TypeId;

use rhai::{Dynamic, Engine};

use super::{NativeTrampoline, Script};

impl Script {
    /// Binds `trampoline` under `name` in the script's global namespace,
    /// replacing an earlier binding. The binding is kept across `reload`.
    pub fn register_native_function(&mut self, name: &str, trampoline: NativeTrampoline) {
        let Some(vm) = self.vm.as_mut() else {
            self.diagnostics.error(format!(
                "Try to register function \"{}\" on a deleted script!",
                name
            ));
            return;
        };

        install_trampoline(
            &mut vm.engine,
            name,
            trampoline,
            self.config.max_callback_arity,
        );
        self.callbacks.insert(name.to_string(), trampoline);
    }

    pub fn has_native_function(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }
}

/// Raw functions have a fixed arity, so the trampoline is installed once per
/// argument count with every parameter typed as `Dynamic`.
#[allow(deprecated)]
pub(crate) fn install_trampoline(
    engine: &mut Engine,
    name: &str,
    trampoline: NativeTrampoline,
    max_arity: usize,
) {
    for arity in 0..=max_arity {
        let arg_types = vec![TypeId::of::<Dynamic>(); arity];
        engine.register_raw_fn(name, arg_types, trampoline);
    }
}
