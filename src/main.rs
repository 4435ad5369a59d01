mod config;
mod db;
mod export;
mod ledger;
mod logging;
mod models;
mod run;
mod ui;
mod validate;

use anyhow::Result;

use config::{AppDirs, Config};
use logging::LogTarget;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let dirs = AppDirs::discover()?;
    dirs.ensure_data_dir()?;
    let config = Config::load(&dirs.config_file())?;

    let interactive = args.len() == 1;
    if interactive {
        logging::init(&config.log_filter, LogTarget::File(dirs.log_file()))?;
    } else {
        // Command output goes to stdout; only problems reach stderr.
        logging::init("warn", LogTarget::Stderr)?;
    }

    let db_path = config::resolve_db_path(
        &config,
        std::env::var(config::DB_ENV).ok(),
        &dirs.data_dir,
    );
    let mut db = db::Database::open(&db_path)?;
    tracing::info!(
        db = %db_path.display(),
        entries = db.entry_count()?,
        interactive,
        "cashbook starting"
    );

    if interactive {
        run::as_tui(&mut db, &config.currency_symbol)
    } else {
        run::as_cli(&args, &mut db, &config)
    }
}
