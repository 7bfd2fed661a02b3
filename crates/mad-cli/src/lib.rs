use std::ffi::OsString;

use clap::Parser;

mod cli_args;
mod error_map;
mod printers;
mod runner;
mod value_spec;

pub(crate) use cli_args::{CheckArgs, Cli, Mode, RunArgs};
pub(crate) use error_map::{
    emit_error, map_call_result, map_cli_config_invalid, map_cli_config_read,
    map_cli_script_read, map_cli_value_spec, CliError,
};
pub use printers::init_tracing;
pub(crate) use printers::stdout_diagnostics;
pub(crate) use value_spec::{parse_binding, parse_buffer, parse_value_spec, render_value};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Mode::Check(args) => runner::run_check(args),
        Mode::Run(args) => runner::run_script(args),
    }
}
