//! The `hinglish` command-line front end.

use hinglish::cli::Cli;

/// Installs a global [`tracing`] subscriber if `HINGLISH_LOGGING` names a level.
fn setup_tracing() {
    use tracing::level_filters::LevelFilter;

    let loglevel = std::env::var("HINGLISH_LOGGING");
    let filter = match loglevel.as_ref().map(|x| x.as_ref()) {
        Ok("T") | Ok("TRACE") => LevelFilter::TRACE,
        Ok("D") | Ok("DEBUG") => LevelFilter::DEBUG,
        Ok("I") | Ok("INFO") => LevelFilter::INFO,
        Ok("W") | Ok("WARN") => LevelFilter::WARN,
        Ok("E") | Ok("ERROR") => LevelFilter::ERROR,
        Ok("O") | Ok("OFF") => LevelFilter::OFF,
        _ => return,
    };

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    better_panic::install();
    setup_tracing();

    let cli: Cli = argh::from_env();
    cli.handle()
}
