use anyhow::Context as _;
use clap::Parser;
use ignis::Cli;
use ignis::commands::{self, Context};
use ignis::config::IgnisConfig;
use tracing_subscriber::EnvFilter;

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: resets the SIGPIPE disposition to the POSIX default; no memory
    // is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

/// Log to stderr. `-v` forces debug; otherwise `RUST_LOG`, then the
/// configured level.
fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    reset_sigpipe();

    let cli = Cli::parse();
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("failed to resolve the working directory")?,
    };
    let config = IgnisConfig::load(&root);
    init_tracing(config.log.level(), cli.verbose);

    let ctx = Context::new(root, config, cli.post_types, cli.taxonomies);
    let code = commands::run(cli.command, &ctx);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
