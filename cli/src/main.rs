//! Tomcat development CLI - lifecycle manager for a local Tomcat instance

use clap::Parser;

use tomcat_dev_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
