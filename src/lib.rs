pub mod models;
pub mod services;
pub mod commands;
pub mod db;
pub mod utils;

use anyhow::{anyhow, Result};
use db::database::Database;
use models::settings::AppSettings;
use services::export_service::ExportService;
use services::notifier::{LogNotifier, Notifier};
use services::watchlist_store::WatchlistStore;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct AppState {
    pub db: Arc<Database>,
    pub data_dir: PathBuf,
    pub watchlist: Mutex<WatchlistStore<Arc<Database>>>,
    pub exporter: ExportService,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        Self::with_notifier(data_dir, Arc::new(LogNotifier))
    }

    /// Opens the database under `data_dir`, loads settings and the saved
    /// watchlist. Rendering is left to the caller.
    pub fn with_notifier(data_dir: PathBuf, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let db = Arc::new(Database::new(data_dir.clone())?);
        let settings = db.load_settings()?;
        let watchlist = WatchlistStore::new(db.clone())?;
        let exporter = ExportService::new(&settings, download_dir(&data_dir, &settings), notifier)?;

        Ok(Self {
            db,
            data_dir,
            watchlist: Mutex::new(watchlist),
            exporter,
        })
    }

    pub fn watchlist(&self) -> Result<MutexGuard<'_, WatchlistStore<Arc<Database>>>> {
        self.watchlist.lock().map_err(|_| anyhow!("watchlist lock poisoned"))
    }
}

pub fn download_dir(data_dir: &std::path::Path, settings: &AppSettings) -> PathBuf {
    match &settings.download_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => data_dir.join("downloads"),
    }
}

/// Platform data directory used when no `--data-dir` is given.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("watchlist-helper")
}
