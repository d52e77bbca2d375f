//! Command line application that displays the accessibility of RATP bus
//! routes and bus stops.

mod output;

use clap::{CommandFactory, Parser};
use output::{write_routes, write_stops, OutputFormat};
use ratp_access_db::queries::{fetch_routes, fetch_stops};
use ratp_access_db::DbPool;
use ratp_access_importer::config::{
    DEFAULT_DATABASE_PATH, DEFAULT_ROUTES_FILE, DEFAULT_ROUTES_SHEET, DEFAULT_STOPS_FILE,
    DEFAULT_STOPS_SHEET,
};
use ratp_access_importer::{
    append_import_report, rebuild_database, ImportConfig, StaleStorePolicy,
};
use ratp_access_telemetry::init_logging;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ratp-access")]
#[command(about = "Displays the accessibility of RATP bus routes and bus stops")]
struct Cli {
    /// Import the spreadsheets and (re)build the database. An existing
    /// database is destroyed then recreated
    #[arg(short = 'i')]
    do_import: bool,

    /// List available routes
    #[arg(short = 'l')]
    list_routes: bool,

    /// List the stops of the given route, e.g. 54
    #[arg(short = 's', value_name = "ROUTE_NUMBER")]
    route_number: Option<String>,

    /// Limit the number of displayed values. Use -1 to display all
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    limit: i64,

    /// Database path
    #[arg(long, default_value = DEFAULT_DATABASE_PATH)]
    database_path: String,

    /// Routes accessibility spreadsheet
    #[arg(long, default_value = DEFAULT_ROUTES_FILE)]
    routes_file: PathBuf,

    /// Stops accessibility spreadsheet
    #[arg(long, default_value = DEFAULT_STOPS_FILE)]
    stops_file: PathBuf,

    /// Name of the sheet holding the routes
    #[arg(long, default_value = DEFAULT_ROUTES_SHEET)]
    routes_sheet: String,

    /// Name of the sheet holding the stops
    #[arg(long, default_value = DEFAULT_STOPS_SHEET)]
    stops_sheet: String,

    /// Abort the import when the previous database cannot be removed
    #[arg(long)]
    fail_on_stale_db: bool,

    /// Log level
    #[arg(long)]
    log_level: Option<String>,

    /// File receiving a copy of the logs
    #[arg(long, default_value = "ratp.log")]
    log_file: PathBuf,

    /// Only log to stderr
    #[arg(long)]
    no_log_file: bool,

    /// Output format of listings
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Append a one-line JSON report of the import to this file
    #[arg(long)]
    report_path: Option<PathBuf>,
}

impl Cli {
    fn import_config(&self) -> ImportConfig {
        ImportConfig {
            routes_file: self.routes_file.clone(),
            stops_file: self.stops_file.clone(),
            routes_sheet: self.routes_sheet.clone(),
            stops_sheet: self.stops_sheet.clone(),
            database_path: self.database_path.clone(),
            stale_store_policy: if self.fail_on_stale_db {
                StaleStorePolicy::Fail
            } else {
                StaleStorePolicy::Warn
            },
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = (!cli.no_log_file).then_some(cli.log_file.as_path());
    let _log_guard = init_logging(cli.log_level.as_deref(), log_file)?;

    if cli.do_import {
        import_data(&cli).await?;
    } else if cli.list_routes {
        list_routes(&cli).await?;
    } else if let Some(route_number) = cli.route_number.as_deref() {
        list_stops(&cli, route_number).await?;
    } else {
        Cli::command().print_help()?;
    }

    Ok(())
}

async fn import_data(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.import_config();
    info!(
        "Importing {} and {} into {}",
        config.routes_file.display(),
        config.stops_file.display(),
        config.database_path
    );

    let report = rebuild_database(&config).await?;
    if let Some(path) = &cli.report_path {
        append_import_report(path, &report)?;
    }
    Ok(())
}

async fn list_routes(cli: &Cli) -> anyhow::Result<()> {
    let db = DbPool::open(&cli.database_path).await?;
    let routes = fetch_routes(&db, cli.limit).await;
    db.close().await;
    let routes = routes?;
    debug!("Fetched {} routes", routes.len());

    let mut stdout = std::io::stdout().lock();
    write_routes(&mut stdout, &routes, cli.format)?;
    stdout.flush()?;
    Ok(())
}

async fn list_stops(cli: &Cli, route_number: &str) -> anyhow::Result<()> {
    let db = DbPool::open(&cli.database_path).await?;
    let stops = fetch_stops(&db, route_number, cli.limit).await;
    db.close().await;
    let stops = stops?;
    debug!("Fetched {} stops for route {}", stops.len(), route_number);

    let mut stdout = std::io::stdout().lock();
    write_stops(&mut stdout, route_number, &stops, cli.format)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ratp-access", "-l"]).unwrap();
        assert!(cli.list_routes);
        assert!(!cli.do_import);
        assert_eq!(cli.limit, 5);
        assert_eq!(cli.database_path, "ratp.db");
        assert_eq!(cli.format, OutputFormat::Text);

        let config = cli.import_config();
        assert_eq!(config.routes_sheet, "Accessibilité Lignes");
        assert_eq!(config.stops_sheet, "Bus");
        assert_eq!(config.stale_store_policy, StaleStorePolicy::Warn);
    }

    #[test]
    fn test_stops_with_unbounded_limit() {
        let cli = Cli::try_parse_from(["ratp-access", "-s", "54", "--limit", "-1"]).unwrap();
        assert_eq!(cli.route_number.as_deref(), Some("54"));
        assert_eq!(cli.limit, -1);
    }

    #[test]
    fn test_import_flags() {
        let cli = Cli::try_parse_from([
            "ratp-access",
            "-i",
            "--fail-on-stale-db",
            "--routes-file",
            "lignes.xlsx",
            "--format",
            "csv",
        ])
        .unwrap();
        assert!(cli.do_import);
        assert_eq!(cli.format, OutputFormat::Csv);
        let config = cli.import_config();
        assert_eq!(config.stale_store_policy, StaleStorePolicy::Fail);
        assert_eq!(config.routes_file, PathBuf::from("lignes.xlsx"));
    }
}
