use std::path::Path;

use clap::Parser;

use plateful::adapter::inbound::cli::command::{Cli, Commands};
use plateful::adapter::inbound::cli::output::OutputConfig;
use plateful::adapter::inbound::cli::{diagnostic, food, incidents, orders, output, paths, purchase};
use plateful::app::{AppContext, Config, MemoryContext, SqliteContext};
use plateful::error::{ConfigError, Error, Result};
use plateful::port::outbound::{ItemStore, PurchaseStore};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let config_path = cli.config.clone().unwrap_or_else(paths::default_config);
    let config = match load_config(cli.config.is_some(), &config_path) {
        Ok(config) => config,
        Err(e) => {
            report_config_error(&config_path, &e);
            std::process::exit(1);
        }
    };

    init_logging(&cli, &config);

    let result = if cli.memory {
        dispatch(cli.command, &MemoryContext::in_memory()).await
    } else {
        match open_database(&cli, &config) {
            Ok(ctx) => dispatch(cli.command, &ctx).await,
            Err(e) => Err(e),
        }
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// An explicitly requested file must exist; the default location is
/// allowed to be absent.
fn load_config(explicit: bool, path: &Path) -> Result<Config> {
    if explicit {
        Config::load(path)
    } else {
        Config::load_or_default(path)
    }
}

fn report_config_error(path: &Path, err: &Error) {
    if let Error::Config(ConfigError::Parse(parse)) = err {
        if let Some(report) = diagnostic::config_parse_report(path, parse) {
            eprintln!("{report:?}");
            return;
        }
    }
    output::error(&format!("failed to load configuration: {err}"));
}

/// `-v` flags outrank the configured level for this invocation.
fn init_logging(cli: &Cli, config: &Config) {
    let mut logging = config.logging.clone();
    match cli.verbose {
        0 => {}
        1 => logging.level = "debug".into(),
        _ => logging.level = "trace".into(),
    }
    logging.init();
}

fn open_database(cli: &Cli, config: &Config) -> Result<SqliteContext> {
    let db_path = cli
        .db
        .clone()
        .or_else(|| config.storage.database_path.clone())
        .unwrap_or_else(paths::default_database);

    // The default location lives under the home directory, which may not
    // exist yet on a fresh machine.
    if db_path.starts_with(paths::home_dir()) {
        paths::ensure_home_dir()?;
    }

    SqliteContext::open_sqlite(&db_path)
}

async fn dispatch<I, P>(command: Commands, ctx: &AppContext<I, P>) -> Result<()>
where
    I: ItemStore,
    P: PurchaseStore,
{
    match command {
        Commands::AddFood(args) => food::add(ctx, args).await,
        Commands::Food(args) => food::show(ctx, args).await,
        Commands::EditFood(args) => food::edit(ctx, args).await,
        Commands::Purchase(args) => purchase::place(ctx, args).await,
        Commands::Cancel(args) => purchase::cancel(ctx, args).await,
        Commands::Orders(args) => orders::execute(ctx, args).await,
        Commands::Incidents => incidents::execute(ctx).await,
    }
}
