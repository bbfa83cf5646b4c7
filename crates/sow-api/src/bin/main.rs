//! SOW service entry point
//!
//! # Usage
//!
//! ```bash
//! sow-api serve --api-key s3cr3t
//! sow-api render --contract-type NDA a.pdf b.pdf
//! ```

use clap::Parser;
use sow_api::cli::{Cli, Commands};
use sow_api::{init_tracing, render_sow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Commands::Serve(args) => {
            let config = args.resolve()?;
            sow_api::serve(config).await?;
        }

        Commands::Render {
            contract_type,
            filenames,
        } => {
            println!("{}", render_sow(&contract_type, &filenames));
        }
    }

    Ok(())
}
