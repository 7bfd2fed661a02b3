use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mad-cli")]
#[command(about = "Rhai script host driver")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Compile a script and report whether it loads.
    Check(CheckArgs),
    /// Load a script, run its body and optionally call into it.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
    #[arg(long = "config")]
    pub(crate) config: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
    #[arg(long = "config")]
    pub(crate) config: Option<String>,
    /// Global to bind before the body runs, as `name=kind:value`.
    #[arg(long = "set")]
    pub(crate) set: Vec<String>,
    /// Call the `main` entrance function after the body.
    #[arg(long = "main")]
    pub(crate) main: bool,
    #[arg(long = "call")]
    pub(crate) call: Option<String>,
    /// Argument for `--call`, as `kind:value`.
    #[arg(long = "arg")]
    pub(crate) arg: Vec<String>,
    #[arg(long = "repeat", default_value_t = 1)]
    pub(crate) repeat: usize,
    /// Invoke through a quick call pack instead of a plain call.
    #[arg(long = "quick")]
    pub(crate) quick: bool,
    #[arg(long = "get")]
    pub(crate) get: Vec<String>,
    /// Zeroed number buffer bound as a `UserPtr` global, as `name=len`.
    /// Printed after the run.
    #[arg(long = "buffer")]
    pub(crate) buffer: Vec<String>,
}
