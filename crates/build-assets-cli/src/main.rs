//! Main entrypoint for the `build-assets` command.

use build_assets::Cli;
use clap::Parser as _;

fn main() {
    env_logger::builder().init();

    if let Err(error) = run() {
        log::error!("{error:?}");

        #[expect(
            clippy::restriction,
            reason = "Our central place for safely exiting the program"
        )]
        std::process::exit(1);
    }
}

/// Wrappable "main" to catch errors.
fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.run()
}
