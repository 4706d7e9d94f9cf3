use crate::models::view::WatchlistView;
use crate::models::watchlist::{DisplayStock, WatchlistItem};
use crate::services::renderer::RenderTarget;
use crate::AppState;

pub fn add_watchlist_stock(
    state: &AppState,
    code: String,
) -> Result<Vec<WatchlistItem>, String> {
    let mut store = state.watchlist().map_err(|e| e.to_string())?;
    store.add(&code).map_err(|e| e.to_string())?;
    Ok(store.list().to_vec())
}

pub fn remove_watchlist_stock(
    state: &AppState,
    code: String,
) -> Result<Vec<WatchlistItem>, String> {
    let mut store = state.watchlist().map_err(|e| e.to_string())?;
    store.remove(&code).map_err(|e| e.to_string())?;
    Ok(store.list().to_vec())
}

pub fn get_watchlist_stocks(
    state: &AppState,
) -> Result<Vec<WatchlistItem>, String> {
    let store = state.watchlist().map_err(|e| e.to_string())?;
    Ok(store.list().to_vec())
}

pub fn render_watchlist(
    state: &AppState,
    stocks: Vec<DisplayStock>,
) -> Result<WatchlistView, String> {
    let settings = state.db.load_settings().map_err(|e| e.to_string())?;
    let store = state.watchlist().map_err(|e| e.to_string())?;
    store.render(&stocks, settings.render_policy()).map_err(|e| e.to_string())
}

/// Writes the HTML card list into `target`; no target, no render.
pub fn render_watchlist_html(
    state: &AppState,
    stocks: Vec<DisplayStock>,
    target: Option<&mut dyn RenderTarget>,
) -> Result<(), String> {
    let settings = state.db.load_settings().map_err(|e| e.to_string())?;
    let store = state.watchlist().map_err(|e| e.to_string())?;
    store
        .render_into(target, &stocks, settings.render_policy())
        .map_err(|e| e.to_string())
}

/// 엑셀 내보내기. 실패는 알림으로 처리되고 `Ok(None)` 이 된다.
pub async fn export_watchlist(
    state: &AppState,
    stocks: Vec<DisplayStock>,
    limit: Option<u32>,
    dividend_filter: Option<f64>,
) -> Result<Option<String>, String> {
    let limit = match limit {
        Some(limit) => limit,
        None => state.db.load_settings().map_err(|e| e.to_string())?.default_export_limit,
    };
    let saved = state
        .exporter
        .export_to_spreadsheet(&stocks, limit, dividend_filter)
        .await;
    Ok(saved.map(|p| p.display().to_string()))
}
