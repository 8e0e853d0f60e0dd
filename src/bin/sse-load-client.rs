use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use sse_load_client::output::print_report;
use sse_load_client::Harness;

#[derive(Parser)]
#[command(name = "sse-load-client")]
#[command(about = "Concurrent SSE load and event-counting client")]
struct Cli {
    /// Target SSE endpoint (e.g. http://localhost:4747/events)
    #[arg(long)]
    url: String,

    /// Number of concurrent connections to open
    #[arg(long, short, default_value_t = 200)]
    connections: u32,

    /// How long to keep the connections open, in seconds
    #[arg(long, short, default_value_t = 60)]
    duration: u64,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    println!("Starting {} SSE connections...", cli.connections);

    let duration = Duration::from_secs(cli.duration);
    let harness = Harness::new(cli.url, cli.connections, duration);

    println!("\nRunning for {} seconds...", cli.duration);
    let report = harness.run().await;

    print_report(&report, duration);

    Ok(())
}
