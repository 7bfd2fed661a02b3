use mad_core::{Channel, Diagnostics};

pub(crate) fn channel_prefix(channel: Channel) -> &'static str {
    match channel {
        Channel::Error => "[MAD_ERR]",
        Channel::Warning => "[MAD_WARN]",
        Channel::Information => "[MAD_INFO]",
    }
}

/// Diagnostics with every channel bound to a prefixed stdout line.
pub(crate) fn stdout_diagnostics() -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for channel in [Channel::Error, Channel::Warning, Channel::Information] {
        let prefix = channel_prefix(channel);
        diagnostics.set_printer(channel, move |message| println!("{} {}", prefix, message));
    }
    diagnostics
}

/// Installs the stderr subscriber; `RUST_LOG` selects levels. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
