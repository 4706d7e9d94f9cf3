use anyhow::{anyhow, Result};

use crate::db::local_storage::LocalStorage;
use crate::models::settings::MissingValuePolicy;
use crate::models::view::WatchlistView;
use crate::models::watchlist::{DisplayStock, WatchlistItem};
use crate::services::metrics;
use crate::services::renderer::{self, RenderTarget};

/// Storage key holding the JSON array of `{code}` entries.
pub const WATCHLIST_KEY: &str = "watchlist";

/// 관심종목 목록. 생성 시 한 번 로드하고, 변경할 때마다 저장한다.
pub struct WatchlistStore<S: LocalStorage> {
    storage: S,
    items: Vec<WatchlistItem>,
}

impl<S: LocalStorage> WatchlistStore<S> {
    /// Loads the persisted list. Corrupt stored JSON is an error.
    pub fn new(storage: S) -> Result<Self> {
        let mut store = Self {
            storage,
            items: Vec::new(),
        };
        store.items = store.load()?;
        log::info!("watchlist loaded: {} items", store.items.len());
        Ok(store)
    }

    pub fn load(&self) -> Result<Vec<WatchlistItem>> {
        match self.storage.get_item(WATCHLIST_KEY)? {
            Some(saved) if !saved.is_empty() => serde_json::from_str(&saved)
                .map_err(|e| anyhow!("관심종목 데이터 파싱 실패: {}", e)),
            _ => Ok(Vec::new()),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.persist(&self.items)
    }

    fn persist(&self, items: &[WatchlistItem]) -> Result<()> {
        let data = serde_json::to_string(items)?;
        self.storage.set_item(WATCHLIST_KEY, &data)
    }

    /// Appends `code` unless it is already listed. Returns whether the list
    /// changed; an unchanged list is not written back. The in-memory list
    /// only changes once the write succeeded.
    pub fn add(&mut self, code: &str) -> Result<bool> {
        if self.items.iter().any(|item| item.code == code) {
            return Ok(false);
        }
        let mut next = self.items.clone();
        next.push(WatchlistItem::new(code));
        self.persist(&next)?;
        self.items = next;
        log::debug!("watchlist add {}", code);
        Ok(true)
    }

    /// Drops every entry with `code` and writes the list back, whether or
    /// not anything matched.
    pub fn remove(&mut self, code: &str) -> Result<()> {
        let next: Vec<WatchlistItem> = self
            .items
            .iter()
            .filter(|item| item.code != code)
            .cloned()
            .collect();
        self.persist(&next)?;
        self.items = next;
        log::debug!("watchlist remove {}", code);
        Ok(())
    }

    pub fn list(&self) -> &[WatchlistItem] {
        &self.items
    }

    pub fn compute_return_pct(&self, stock: &DisplayStock) -> Option<f64> {
        metrics::compute_return_pct(stock)
    }

    pub fn compute_total_value(&self, stock: &DisplayStock) -> Option<f64> {
        metrics::compute_total_value(stock)
    }

    pub fn compute_total_return_pct(&self, stock: &DisplayStock) -> Option<f64> {
        metrics::compute_total_return_pct(stock)
    }

    /// Card list for the current items, joined with caller-supplied display data.
    pub fn render(&self, stocks: &[DisplayStock], policy: MissingValuePolicy) -> Result<WatchlistView> {
        renderer::build_view(&self.items, stocks, policy)
    }

    /// Writes the HTML card list into `target`. Without a target nothing happens.
    pub fn render_into(
        &self,
        target: Option<&mut dyn RenderTarget>,
        stocks: &[DisplayStock],
        policy: MissingValuePolicy,
    ) -> Result<()> {
        let Some(target) = target else {
            return Ok(());
        };
        let view = self.render(stocks, policy)?;
        target.replace_content(&renderer::render_html(&view))
    }
}
