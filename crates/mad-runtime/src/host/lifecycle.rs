use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use mad_core::{DebugInfo, Diagnostics, ResCode, ScriptConfig};
use rhai::ParseError;
use tracing::debug;

use super::vm::{build_engine, Vm};
use super::{HostId, Script, ScriptOptions, ScriptState};
use crate::helpers::rhai_bridge::classify_parse_error;

static NEXT_HOST_ID: AtomicU64 = AtomicU64::new(1);

impl Script {
    /// Validates `source` in a throwaway engine, then builds a host holding
    /// its own compiled copy in the `Loaded` state. The top-level body does
    /// not run until [`Script::run_init`].
    pub fn create(source: &str, options: ScriptOptions) -> Result<Self, DebugInfo> {
        let ScriptOptions {
            config,
            diagnostics,
        } = options;

        let validator = build_engine(&config, &diagnostics, &BTreeMap::new());
        if let Err(error) = validator.compile(source) {
            let info = compile_failure(&error);
            diagnostics.error(&info.description);
            return Err(info);
        }
        drop(validator);

        let mut script = Self {
            id: HostId(NEXT_HOST_ID.fetch_add(1, Ordering::Relaxed)),
            source: String::new(),
            state: ScriptState::Deleted,
            vm: None,
            generation: 0,
            config,
            diagnostics,
            callbacks: BTreeMap::new(),
        };
        if let Err(info) = script.install_vm(source) {
            script.diagnostics.error(&info.description);
            return Err(info);
        }

        script.diagnostics.info("Script loaded successfully.");
        Ok(script)
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn state(&self) -> ScriptState {
        self.state
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn script_text(&self) -> String {
        if self.state == ScriptState::Deleted {
            self.diagnostics
                .warn("Try to get text from a script that had already deleted!");
            return String::new();
        }
        self.source.clone()
    }

    /// Runs the top-level body.
    ///
    /// On a `Loaded` host the body runs against the host's own globals and the
    /// host becomes `Ready` even when the body fails. On a `Ready` host the
    /// source runs in a disposable engine so initialized globals stay intact.
    pub fn run_init(&mut self) -> ResCode {
        match self.state {
            ScriptState::Deleted => {
                self.diagnostics
                    .error("Try to run a script that had already deleted!");
                ResCode::IllegalCall
            }
            ScriptState::Ready => {
                self.diagnostics.warn(concat!(
                    "Call run_init on a ready script! ",
                    "The body runs in an isolated VM instead of the current one."
                ));
                let engine = build_engine(&self.config, &self.diagnostics, &self.callbacks);
                match engine.run(&self.source) {
                    Ok(()) => ResCode::Ok,
                    Err(error) => {
                        self.diagnostics.error(format!(
                            "Script run_init error in isolated VM: \"{}\"",
                            error
                        ));
                        ResCode::FunctionFailed
                    }
                }
            }
            ScriptState::Loaded => {
                let Some(vm) = self.vm.as_mut() else {
                    return ResCode::IllegalCall;
                };
                let result = vm.engine.run_ast_with_scope(&mut vm.scope, &vm.ast);
                self.state = ScriptState::Ready;
                match result {
                    Ok(()) => ResCode::Ok,
                    Err(error) => {
                        self.diagnostics.warn(format!(
                            "Script runtime error caught in run_init. Script error: \"{}\"",
                            error
                        ));
                        ResCode::FunctionFailed
                    }
                }
            }
        }
    }

    /// Releases the engine instance and clears the source. Outstanding quick
    /// call packs become stale.
    pub fn delete(&mut self) {
        debug!(target: "mad", host = self.id.0, generation = self.generation, "deleting host");
        self.state = ScriptState::Deleted;
        self.vm = None;
        self.source.clear();
    }

    /// Loads new source into a deleted host. Registered native functions are
    /// installed again on the new engine.
    pub fn reload(&mut self, source: &str) -> DebugInfo {
        if self.state != ScriptState::Deleted {
            let message = "Try to reload a script without delete.";
            self.diagnostics.error(message);
            return DebugInfo::new(ResCode::IllegalCall, message);
        }

        self.diagnostics.warn(concat!(
            "Try to reload a script. ",
            "If you are clear about what you are doing please ignore this warning."
        ));
        match self.install_vm(source) {
            Ok(()) => {
                self.diagnostics.info("Script reloaded successfully.");
                DebugInfo::ok()
            }
            Err(info) => {
                self.diagnostics.error(&info.description);
                info
            }
        }
    }

    fn install_vm(&mut self, source: &str) -> Result<(), DebugInfo> {
        let engine = build_engine(&self.config, &self.diagnostics, &self.callbacks);
        let ast = engine
            .compile(source)
            .map_err(|error| compile_failure(&error))?;

        self.generation += 1;
        debug!(target: "mad", host = self.id.0, generation = self.generation, "engine installed");
        self.vm = Some(Vm::new(engine, ast, self.generation));
        self.source = source.to_string();
        self.state = ScriptState::Loaded;
        Ok(())
    }
}

fn compile_failure(error: &ParseError) -> DebugInfo {
    DebugInfo::new(
        classify_parse_error(error.err_type()),
        format!("Script load failed. Error detail: {}", error),
    )
}
