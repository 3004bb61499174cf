mod actions;
mod cli;
mod contents;
mod error;
mod types;
mod utils;

use anyhow::Result;
use clap::Parser;
use types::config::{Config, Opts};

/// Exit codes:
/// 1 => something went wrong, see the printed error chain
#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = try_main().await {
        error!("{}", err.to_string());
        err.chain().skip(1).for_each(|cause| {
            due_to!("{}", cause);
        });
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let opts: Opts = Opts::parse();
    cli::set_verbose(opts.verbose);

    let config = Config::from_opts(&opts)?;
    debug!("Effective configuration: {:?}", config);

    actions::fullfill_command(&opts.arch, &config).await
}
