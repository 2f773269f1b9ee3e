//! Nutrilog
//!
//! An MCP server for daily food, supplement and body weight logging.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrilog::config::Config;
use nutrilog::mcp::NutrilogService;
use nutrilog::{build_info, reference};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr; stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrilog=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env();
    eprintln!("Reference data: {}", config.reference_path.display());

    // Without reference data there is nothing to serve
    let table = match reference::init_global(&config.reference_path, config.load_policy) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Cannot start: {}", e);
            eprintln!("Reference data could not be loaded: {}", e);
            return Err(e.into());
        }
    };

    if !table.skipped_rows().is_empty() {
        eprintln!(
            "Warning: {} reference row(s) skipped, see log for details",
            table.skipped_rows().len()
        );
    }

    let service = NutrilogService::new(table, config.load_policy, config.chart_dir);

    eprintln!("Starting MCP server on stdio...");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
