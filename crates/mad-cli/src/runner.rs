use std::fs;

use mad_core::{ResCode, ScriptConfig, ScriptValue, UserPtr};
use mad_runtime::{Script, ScriptOptions};
use tracing::debug;

use crate::{
    map_call_result, map_cli_config_invalid, map_cli_config_read, map_cli_script_read,
    parse_binding, parse_buffer, parse_value_spec, render_value, stdout_diagnostics, CheckArgs,
    CliError, RunArgs,
};

pub(crate) fn load_config(path: Option<&str>) -> Result<ScriptConfig, CliError> {
    let Some(path) = path else {
        return Ok(ScriptConfig::default());
    };
    let raw = fs::read_to_string(path).map_err(map_cli_config_read)?;
    serde_json::from_str(&raw).map_err(map_cli_config_invalid)
}

fn create_script(script_path: &str, config_path: Option<&str>) -> Result<Script, CliError> {
    let source = fs::read_to_string(script_path).map_err(map_cli_script_read)?;
    let config = load_config(config_path)?;
    debug!(target: "mad_cli", script = script_path, ?config, "creating script host");
    let script = Script::create(
        &source,
        ScriptOptions {
            config,
            diagnostics: stdout_diagnostics(),
        },
    )?;
    Ok(script)
}

pub(crate) fn run_check(args: CheckArgs) -> Result<i32, CliError> {
    let mut script = create_script(&args.script, args.config.as_deref())?;
    script.delete();
    println!("RESULT:OK");
    Ok(0)
}

pub(crate) fn run_script(args: RunArgs) -> Result<i32, CliError> {
    let bindings = args
        .set
        .iter()
        .map(|spec| parse_binding(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let call_args = args
        .arg
        .iter()
        .map(|spec| parse_value_spec(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let mut buffers = args
        .buffer
        .iter()
        .map(|spec| parse_buffer(spec).map(|(name, len)| (name, vec![0.0_f64; len])))
        .collect::<Result<Vec<_>, _>>()?;

    let mut script = create_script(&args.script, args.config.as_deref())?;
    for (name, value) in &bindings {
        script.set_value(name, value);
    }
    for (name, buffer) in &mut buffers {
        script.set_pointer(name, UserPtr::new(buffer.as_mut_ptr()));
    }

    let init = script.run_init();
    if init != ResCode::Ok {
        return Err(CliError::new(
            init.name(),
            "Script body failed during run_init",
        ));
    }

    if args.main {
        map_call_result("main", script.call_main())?;
    }

    if let Some(func_name) = args.call.as_deref() {
        let returns = invoke(&mut script, func_name, &call_args, args.repeat, args.quick)?;
        for value in &returns {
            println!("RETURN:{}", render_value(value));
        }
    }

    for name in &args.get {
        println!("VALUE:{}={}", name, render_value(&script.get_value(name)));
    }

    script.delete();
    for (name, buffer) in &buffers {
        for (index, value) in buffer.iter().enumerate() {
            println!("BUFFER:{}[{}]={}", name, index, value);
        }
    }
    println!("RESULT:OK");
    Ok(0)
}

/// Calls `func_name` `repeat` times and returns the results of the last plain
/// call. Quick calls discard results.
fn invoke(
    script: &mut Script,
    func_name: &str,
    call_args: &[ScriptValue],
    repeat: usize,
    quick: bool,
) -> Result<Vec<ScriptValue>, CliError> {
    if quick {
        let Some(pack) = script.register_quick_call_pack(func_name, call_args) else {
            return Err(CliError::new(
                ResCode::FunctionNotFound.name(),
                format!("Could not build a quick call pack for '{}'", func_name),
            ));
        };
        let mut outcome = Ok(());
        for _ in 0..repeat {
            outcome = map_call_result(func_name, script.quick_call(&pack));
            if outcome.is_err() {
                break;
            }
        }
        if script.unregister_quick_call_pack(pack).is_err() {
            debug!(target: "mad_cli", func_name, "quick call pack was rejected on unregister");
        }
        return outcome.map(|()| Vec::new());
    }

    let mut returns = Vec::new();
    for _ in 0..repeat {
        returns.clear();
        map_call_result(
            func_name,
            script.call_function(func_name, call_args, Some(&mut returns)),
        )?;
    }
    Ok(returns)
}

#[cfg(test)]
mod runner_tests {
    use super::*;

    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!("mad-rs-{}-{}", name, nanos))
    }

    fn write_temp(name: &str, content: &str) -> String {
        let path = temp_path(name);
        fs::write(&path, content).expect("file should be written");
        path.to_string_lossy().to_string()
    }

    fn run_args(script: String) -> RunArgs {
        RunArgs {
            script,
            config: None,
            set: Vec::new(),
            main: false,
            call: None,
            arg: Vec::new(),
            repeat: 1,
            quick: false,
            get: Vec::new(),
            buffer: Vec::new(),
        }
    }

    #[test]
    fn load_config_defaults_without_path() {
        assert_eq!(load_config(None), Ok(ScriptConfig::default()));
    }

    #[test]
    fn load_config_reads_partial_json() {
        let path = write_temp("config.json", r#"{ "maxCallLevels": 9 }"#);
        let config = load_config(Some(&path)).expect("config should load");
        assert_eq!(config.max_call_levels, 9);
        assert_eq!(config.max_expr_depth, ScriptConfig::default().max_expr_depth);
    }

    #[test]
    fn load_config_maps_read_and_parse_failures() {
        let missing = temp_path("missing-config.json");
        let error = load_config(Some(missing.to_string_lossy().as_ref()))
            .expect_err("missing config should fail");
        assert_eq!(error.code, "CLI_CONFIG_READ");

        let path = write_temp("broken-config.json", "{");
        let error = load_config(Some(&path)).expect_err("broken config should fail");
        assert_eq!(error.code, "CLI_CONFIG_INVALID");
    }

    #[test]
    fn check_reports_syntax_errors_by_result_code() {
        let path = write_temp("broken.rhai", "let = (");
        let error = run_check(CheckArgs {
            script: path,
            config: None,
        })
        .expect_err("broken script should fail");
        assert_eq!(error.code, "SYNTAX_ERROR");
    }

    #[test]
    fn run_calls_function_with_bound_globals() {
        let path = write_temp("run.rhai", "fn add(a, b) { a + b } let total = base + 1;");
        let mut args = run_args(path);
        args.set = vec!["base=int:4".to_string()];
        args.call = Some("add".to_string());
        args.arg = vec!["int:2".to_string(), "num:0.5".to_string()];
        args.get = vec!["total".to_string()];
        assert_eq!(run_script(args), Ok(0));
    }

    #[test]
    fn run_maps_missing_function_to_result_code() {
        let path = write_temp("missing.rhai", "let x = 1;");
        let mut args = run_args(path);
        args.call = Some("nowhere".to_string());
        let error = run_script(args).expect_err("missing function should fail");
        assert_eq!(error.code, "FUNC_NOT_FOUND");

        let path = write_temp("missing-quick.rhai", "let x = 1;");
        let mut args = run_args(path);
        args.call = Some("nowhere".to_string());
        args.quick = true;
        let error = run_script(args).expect_err("missing quick function should fail");
        assert_eq!(error.code, "FUNC_NOT_FOUND");
    }

    #[test]
    fn run_rejects_bad_bindings_before_loading() {
        let mut args = run_args("does-not-matter.rhai".to_string());
        args.set = vec!["broken".to_string()];
        let error = run_script(args).expect_err("bad binding should fail");
        assert_eq!(error.code, "CLI_VALUE_SPEC");
    }

    #[test]
    fn run_fills_bound_buffers() {
        let path = write_temp("buffer.rhai", "CopyNumberToArray(out, 1.5, 2);");
        let mut args = run_args(path);
        args.buffer = vec!["out=3".to_string()];
        assert_eq!(run_script(args), Ok(0));

        let mut args = run_args("does-not-matter.rhai".to_string());
        args.buffer = vec!["out=0".to_string()];
        let error = run_script(args).expect_err("empty buffer should fail");
        assert_eq!(error.code, "CLI_VALUE_SPEC");
    }

    #[test]
    fn run_reports_failing_body() {
        let path = write_temp("throws.rhai", "throw \"bad body\";");
        let error = run_script(run_args(path)).expect_err("failing body should fail");
        assert_eq!(error.code, "FUNC_FAILED");
    }

    #[test]
    fn quick_invoke_repeats_and_discards_results() {
        let path = write_temp("quick.rhai", "fn tick(n) { n + 1 }");
        let mut script = create_script(&path, None).expect("script should load");
        assert_eq!(script.run_init(), ResCode::Ok);

        let returns = invoke(&mut script, "tick", &[ScriptValue::Integer(1)], 3, true)
            .expect("quick invoke should succeed");
        assert!(returns.is_empty());

        let returns = invoke(&mut script, "tick", &[ScriptValue::Integer(1)], 2, false)
            .expect("plain invoke should succeed");
        assert_eq!(returns, vec![ScriptValue::Number(2.0)]);
    }
}
