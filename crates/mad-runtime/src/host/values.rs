use mad_core::{ScriptValue, UserPtr, ValueKind};
use rhai::{Dynamic, FLOAT, INT};

use super::Script;
use crate::helpers::rhai_bridge::{
    classify_dynamic, dynamic_as_bool, dynamic_as_integer, dynamic_as_number, dynamic_as_pointer,
    dynamic_as_string, value_to_dynamic,
};

// Getters require a ready host and degrade to the kind's zero value with an
// error log. Setters only need an engine, so globals can be seeded before
// `run_init`.
impl Script {
    pub fn value_type(&self, name: &str) -> ValueKind {
        let Some(vm) = self.vm.as_ref() else {
            self.diagnostics.error(format!(
                "Attempt to inspect value '{}' on a deleted script!",
                name
            ));
            return ValueKind::Nil;
        };
        vm.scope
            .get(name)
            .map(classify_dynamic)
            .unwrap_or(ValueKind::Nil)
    }

    pub fn get_integer(&self, name: &str) -> i64 {
        self.read_typed(name, ValueKind::Integer, dynamic_as_integer)
            .unwrap_or(0)
    }

    pub fn get_number(&self, name: &str) -> f64 {
        self.read_typed(name, ValueKind::Number, dynamic_as_number)
            .unwrap_or(0.0)
    }

    pub fn get_string(&self, name: &str) -> String {
        self.read_typed(name, ValueKind::String, dynamic_as_string)
            .unwrap_or_default()
    }

    pub fn get_boolean(&self, name: &str) -> bool {
        self.read_typed(name, ValueKind::Boolean, dynamic_as_bool)
            .unwrap_or(false)
    }

    pub fn get_pointer(&self, name: &str) -> UserPtr {
        self.read_typed(name, ValueKind::Pointer, dynamic_as_pointer)
            .unwrap_or_default()
    }

    /// Reads a global of whatever kind it currently holds.
    pub fn get_value(&self, name: &str) -> ScriptValue {
        match self.value_type(name) {
            ValueKind::Integer => ScriptValue::Integer(self.get_integer(name)),
            ValueKind::Number => ScriptValue::Number(self.get_number(name)),
            ValueKind::String => ScriptValue::String(self.get_string(name)),
            ValueKind::Boolean => ScriptValue::Boolean(self.get_boolean(name)),
            ValueKind::Pointer => ScriptValue::Pointer(self.get_pointer(name)),
            ValueKind::Unknown => {
                self.diagnostics.warn(format!(
                    "Try to get a value of an unsupported type, value name: {}",
                    name
                ));
                ScriptValue::Unknown
            }
            ValueKind::Nil => ScriptValue::Nil,
        }
    }

    pub fn set_integer(&mut self, name: &str, value: i64) {
        self.bind_global(name, Dynamic::from_int(value as INT));
    }

    pub fn set_number(&mut self, name: &str, value: f64) {
        self.bind_global(name, Dynamic::from_float(value as FLOAT));
    }

    pub fn set_string(&mut self, name: &str, value: &str) {
        self.bind_global(name, Dynamic::from(value.to_string()));
    }

    pub fn set_boolean(&mut self, name: &str, value: bool) {
        self.bind_global(name, Dynamic::from_bool(value));
    }

    pub fn set_pointer(&mut self, name: &str, value: UserPtr) {
        self.bind_global(name, Dynamic::from(value));
    }

    /// `Nil` binds unit; `Unknown` is refused.
    pub fn set_value(&mut self, name: &str, value: &ScriptValue) {
        if value.kind() == ValueKind::Unknown {
            self.diagnostics.error(format!(
                "Try to set a value of an unsupported type, value name: {}",
                name
            ));
            return;
        }
        self.bind_global(name, value_to_dynamic(value));
    }

    fn bind_global(&mut self, name: &str, value: Dynamic) {
        let Some(vm) = self.vm.as_mut() else {
            self.diagnostics.error(format!(
                "Attempt to write value '{}' into a deleted script!",
                name
            ));
            return;
        };
        if vm.scope.is_constant(name) == Some(true) {
            self.diagnostics.error(format!(
                "Can't overwrite constant global value named: '{}'.",
                name
            ));
            return;
        }
        vm.scope.set_value(name, value);
    }

    fn read_typed<T>(
        &self,
        name: &str,
        kind: ValueKind,
        extract: impl FnOnce(&Dynamic) -> Option<T>,
    ) -> Option<T> {
        let vm = self.ready_vm("read value")?;
        let value = match vm.scope.get(name).map(|value| value.clone().flatten()) {
            Some(value) if !value.is_unit() => value,
            _ => {
                self.diagnostics
                    .error(format!("Can't find global value named: '{}'.", name));
                return None;
            }
        };

        let extracted = extract(&value);
        if extracted.is_none() {
            self.diagnostics.error(format!(
                "Type mismatch: value '{}' is not of {} type.",
                name, kind
            ));
        }
        extracted
    }
}
