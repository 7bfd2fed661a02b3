fn main() {
    mad_cli::init_tracing();
    std::process::exit(mad_cli::run_cli_from_args(std::env::args_os()));
}
