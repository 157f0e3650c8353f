use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger, writing to stderr so stdout stays JSON.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output and
/// the default is info.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.target(env_logger::Target::Stderr);

    // A logger may already be installed when embedded; keep the existing one.
    let _ = builder.try_init();
}
