use mad_core::{ResCode, ScriptValue, ValueKind};
use rhai::{Dynamic, FnPtr};

use super::vm::Resolved;
use super::Script;
use crate::helpers::rhai_bridge::{return_to_value, spread_returns, value_to_dynamic};

impl Script {
    /// Calls a global function with marshalled arguments.
    ///
    /// When `returns` is given, each returned value is appended in order.
    /// Numbers always come back as [`ScriptValue::Number`].
    pub fn call_function(
        &self,
        name: &str,
        args: &[ScriptValue],
        returns: Option<&mut Vec<ScriptValue>>,
    ) -> ResCode {
        let Some(vm) = self.ready_vm("call function") else {
            return ResCode::IllegalCall;
        };

        let function = match vm.resolve_function(name, &self.callbacks) {
            Resolved::Callable(function) => function,
            Resolved::NotFound => {
                self.diagnostics
                    .error(format!("Can't find global function named: '{}'.", name));
                return ResCode::FunctionNotFound;
            }
            Resolved::NotCallable(type_name) => {
                self.diagnostics.error(format!(
                    "Call function: \"{}\" failed! Global value is a {} and not callable.",
                    name, type_name
                ));
                return ResCode::FunctionFailed;
            }
        };

        let arguments = self.marshal_arguments(name, args, "call script function");
        let result = match vm.call(&function, arguments) {
            Ok(result) => result,
            Err(error) => {
                self.diagnostics.error(format!(
                    "Call function: \"{}\" failed! Script error: \"{}\"",
                    name, error
                ));
                return ResCode::FunctionFailed;
            }
        };

        if let Some(returns) = returns {
            for value in spread_returns(result) {
                let value = return_to_value(value);
                if value.kind() == ValueKind::Unknown {
                    self.diagnostics.error(format!(
                        "Unsupported return value type from script function: \"{}\"",
                        name
                    ));
                }
                returns.push(value);
            }
        }
        ResCode::Ok
    }

    /// Calls the global `main` entrance function without arguments.
    pub fn call_main(&self) -> ResCode {
        let Some(vm) = self.ready_vm("call main") else {
            return ResCode::IllegalCall;
        };
        let Resolved::Callable(function) = vm.resolve_function("main", &self.callbacks) else {
            self.diagnostics
                .error("Can't find function named 'main' as the entrance function!");
            return ResCode::FunctionNotFound;
        };
        match vm.call(&function, Vec::new()) {
            Ok(_) => ResCode::Ok,
            Err(error) => {
                self.diagnostics.warn(format!(
                    "Script runtime error caught in call_main. Script error: \"{}\"",
                    error
                ));
                ResCode::FunctionFailed
            }
        }
    }

    /// Calls a zero-argument function and discards its result. Nothing is
    /// checked and nothing is reported; a missing function or a deleted host
    /// simply does nothing.
    pub fn unsafe_fast_call(&self, func_name: &str) {
        let Some(vm) = self.vm.as_ref() else {
            return;
        };
        let function = match vm.scope.get(func_name) {
            Some(value) => value.clone().flatten().try_cast::<FnPtr>(),
            None => FnPtr::new(func_name).ok(),
        };
        if let Some(function) = function {
            let _ = vm.call(&function, Vec::new());
        }
    }

    pub(super) fn marshal_arguments(
        &self,
        func_name: &str,
        args: &[ScriptValue],
        purpose: &str,
    ) -> Vec<Dynamic> {
        args.iter()
            .map(|arg| {
                if arg.kind() == ValueKind::Unknown {
                    self.diagnostics.error(format!(
                        "Try to push an unknown value to {}: \"{}\"",
                        purpose, func_name
                    ));
                }
                value_to_dynamic(arg)
            })
            .collect()
    }
}
