use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::models::export::{export_file_name, ExportRequest};
use crate::models::settings::AppSettings;
use crate::models::watchlist::DisplayStock;
use crate::services::notifier::Notifier;
use crate::utils::http::{build_export_client, endpoint_url};

pub const EXPORT_PATH: &str = "/watchlist/export";
pub const EXPORT_FAILED_MESSAGE: &str = "엑셀 내보내기 중 오류가 발생했습니다.";

/// 엑셀 내보내기. 서버가 만든 파일을 다운로드 폴더에 저장한다.
///
/// Calls are independent: nothing stops a second export while one is still
/// in flight.
pub struct ExportService {
    client: reqwest::Client,
    endpoint: String,
    download_dir: PathBuf,
    notifier: Arc<dyn Notifier>,
}

impl ExportService {
    pub fn new(settings: &AppSettings, download_dir: PathBuf, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let client = build_export_client(settings.export_timeout_secs.map(Duration::from_secs))?;
        Ok(Self {
            client,
            endpoint: endpoint_url(&settings.server_url, EXPORT_PATH),
            download_dir,
            notifier,
        })
    }

    /// Posts the stocks for export and saves the returned spreadsheet.
    ///
    /// Never fails: any error is logged and reported once through the
    /// notifier, and `None` is returned.
    pub async fn export_to_spreadsheet(
        &self,
        stocks: &[DisplayStock],
        limit: u32,
        dividend_filter: Option<f64>,
    ) -> Option<PathBuf> {
        match self.request_export(stocks, limit, dividend_filter).await {
            Ok(path) => {
                log::info!("export saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::error!("Export error: {:#}", e);
                self.notifier.notify(EXPORT_FAILED_MESSAGE);
                None
            }
        }
    }

    async fn request_export(
        &self,
        stocks: &[DisplayStock],
        limit: u32,
        dividend_filter: Option<f64>,
    ) -> Result<PathBuf> {
        let body = ExportRequest {
            stocks,
            dividend_filter,
            limit,
        };
        log::debug!("POST {} ({} stocks, limit {})", self.endpoint, stocks.len(), limit);

        let resp = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("export endpoint returned {}", status));
        }
        let bytes = resp.bytes().await?;

        let file_name = export_file_name(limit, dividend_filter);
        save_download(&self.download_dir, &file_name, &bytes).await
    }
}

async fn save_download(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
