use std::collections::BTreeMap;

use mad_core::{Diagnostics, ScriptConfig, UserPtr};
use rhai::{Dynamic, Engine, EvalAltResult, FnPtr, Scope, AST};

use super::builtins::install_builtins;
use super::callbacks::install_trampoline;
use super::registry::Registry;
use super::NativeTrampoline;

/// One engine instance owned by a host: compiled body, global scope and
/// persistent registry.
pub(crate) struct Vm {
    pub(crate) engine: Engine,
    pub(crate) ast: AST,
    pub(crate) scope: Scope<'static>,
    pub(crate) registry: Registry,
    pub(crate) generation: u64,
}

pub(crate) enum Resolved {
    Callable(FnPtr),
    NotFound,
    NotCallable(&'static str),
}

impl Vm {
    pub(crate) fn new(engine: Engine, ast: AST, generation: u64) -> Self {
        Self {
            engine,
            ast,
            scope: Scope::new(),
            registry: Registry::default(),
            generation,
        }
    }

    /// A global holding a function pointer wins over script-defined functions
    /// and native callbacks of the same name.
    pub(crate) fn resolve_function(
        &self,
        name: &str,
        callbacks: &BTreeMap<String, NativeTrampoline>,
    ) -> Resolved {
        if let Some(value) = self.scope.get(name) {
            let value = value.clone().flatten();
            if value.is_unit() {
                return Resolved::NotFound;
            }
            let type_name = value.type_name();
            return match value.try_cast::<FnPtr>() {
                Some(fn_ptr) => Resolved::Callable(fn_ptr),
                None => Resolved::NotCallable(type_name),
            };
        }

        let defined = callbacks.contains_key(name)
            || self
                .ast
                .iter_functions()
                .any(|function| function.name == name);
        if !defined {
            return Resolved::NotFound;
        }
        match FnPtr::new(name) {
            Ok(fn_ptr) => Resolved::Callable(fn_ptr),
            Err(_) => Resolved::NotFound,
        }
    }

    pub(crate) fn call(
        &self,
        function: &FnPtr,
        args: Vec<Dynamic>,
    ) -> Result<Dynamic, Box<EvalAltResult>> {
        function.call::<Dynamic>(&self.engine, &self.ast, args)
    }
}

pub(crate) fn build_engine(
    config: &ScriptConfig,
    diagnostics: &Diagnostics,
    callbacks: &BTreeMap<String, NativeTrampoline>,
) -> Engine {
    let mut engine = Engine::new();
    engine.set_strict_variables(config.strict_variables);
    engine.set_max_call_levels(config.max_call_levels);
    engine.set_max_expr_depths(config.max_expr_depth, config.max_function_expr_depth);
    engine.set_max_string_size(config.max_string_size);
    engine.set_max_array_size(config.max_array_size);
    engine.set_max_map_size(config.max_map_size);

    let printer = diagnostics.clone();
    engine.on_print(move |text| printer.info(text));
    let debugger = diagnostics.clone();
    engine.on_debug(move |text, source, position| match source {
        Some(source) => debugger.info(format!("[{source}] {position:?} | {text}")),
        None => debugger.info(format!("{position:?} | {text}")),
    });

    engine
        .register_type_with_name::<UserPtr>("UserPtr")
        .register_fn("is_null", |ptr: &mut UserPtr| ptr.is_null());
    install_builtins(&mut engine, diagnostics, config.max_callback_arity);

    for (name, trampoline) in callbacks {
        install_trampoline(&mut engine, name, *trampoline, config.max_callback_arity);
    }

    engine
}
