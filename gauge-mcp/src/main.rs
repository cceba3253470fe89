//! Gauge MCP Server
//!
//! Line-delimited JSON-RPC over stdio.
//!
//! Tools:
//! - convert: Convert a value between units of one category
//! - describe: Conversion result as a sentence
//! - list_categories: Categories and their base units
//! - list_units: Units of a category
//! - gauge: Help for functions
//! - list_functions: List available functions

mod config;
mod protocol;
mod server;

use std::io::{self, BufRead, Write};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use config::{ServerConfig, DEFAULT_LOG_FILTER, LOG_VAR};
use server::{GaugeServer, PROTOCOL_VERSION, SERVER_VERSION};

fn init_logging() {
    // stdout carries the protocol, so logs go to stderr
    let filter = EnvFilter::try_from_env(LOG_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    init_logging();

    let config = ServerConfig::from_env();
    let server = GaugeServer::new(config.clone());

    info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        precision = config.precision,
        log_filter = %config.log_filter,
        functions = server.function_count(),
        "Gauge MCP server started"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!(bytes = line.len(), "received");

                let Some(response) = server.handle_line(line) else {
                    continue;
                };

                let response_json = match serde_json::to_string(&response) {
                    Ok(json) => json,
                    Err(e) => {
                        error!(error = %e, "failed to serialize response");
                        continue;
                    }
                };

                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response_json).and_then(|_| stdout.flush()) {
                    error!(error = %e, "failed to write response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        }
    }

    info!("server shutting down");
}
