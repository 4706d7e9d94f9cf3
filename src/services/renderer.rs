use anyhow::{anyhow, Result};

use crate::models::settings::MissingValuePolicy;
use crate::models::view::{MetricField, RemoveControl, Trend, WatchlistCard, WatchlistView};
use crate::models::watchlist::{DisplayStock, WatchlistItem};
use crate::services::metrics::{compute_return_pct, compute_total_return_pct, compute_total_value};
use crate::utils::format::{format_fixed, format_grouped, format_won, js_round};

/// Identifier of the container the HTML card list is written into.
pub const WATCHLIST_CONTAINER_ID: &str = "watchlistGrid";

const DASH: &str = "-";

/// A host surface that can display rendered markup.
pub trait RenderTarget {
    fn replace_content(&mut self, markup: &str) -> Result<()>;
}

impl RenderTarget for String {
    fn replace_content(&mut self, markup: &str) -> Result<()> {
        self.clear();
        self.push_str(markup);
        Ok(())
    }
}

/// Builds the card list for `items`, in list order. Display data is looked
/// up in `stocks` by code; an item with no match renders with every field
/// missing.
pub fn build_view(
    items: &[WatchlistItem],
    stocks: &[DisplayStock],
    policy: MissingValuePolicy,
) -> Result<WatchlistView> {
    if items.is_empty() {
        return Ok(WatchlistView::empty());
    }

    let cards = items
        .iter()
        .map(|item| {
            match stocks.iter().find(|s| s.code == item.code) {
                Some(stock) => build_card(stock, policy),
                None => build_card(&DisplayStock::bare(item.code.clone()), policy),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(WatchlistView::Cards { cards })
}

fn build_card(stock: &DisplayStock, policy: MissingValuePolicy) -> Result<WatchlistCard> {
    let strict = policy == MissingValuePolicy::Strict;
    let return_pct = compute_return_pct(stock);
    let total_value = compute_total_value(stock);
    let total_return_pct = compute_total_return_pct(stock);
    let trend = Trend::from_value(return_pct);

    // Currency fields went through Math.round, which turns a missing value
    // into NaN rather than failing.
    let won = |value: Option<f64>| match value {
        Some(v) => format_won(v),
        None if strict => format_won(f64::NAN),
        None => DASH.to_string(),
    };
    let required = |value: Option<String>, what: &str| -> Result<String> {
        match value {
            Some(v) => Ok(v),
            None if strict => Err(anyhow!("{}: {} 값이 없어 표시할 수 없습니다", stock.code, what)),
            None => Ok(DASH.to_string()),
        }
    };

    let name = match &stock.name {
        Some(name) => name.as_str(),
        None if strict => "undefined",
        None => DASH,
    };

    let safety_margin = match stock.safety_margin {
        Some(v) => format!("{}%", js_round(v)),
        None if strict => "NaN%".to_string(),
        None => DASH.to_string(),
    };

    let fields = vec![
        field("매입가", won(stock.purchase_price)),
        field(
            "매입수량",
            required(stock.purchase_quantity.map(|q| format!("{}주", format_grouped(q))), "매입수량")?,
        ),
        field("현재가", won(stock.current_price)),
        MetricField {
            label: "수익률".to_string(),
            value: required(return_pct.map(|r| format!("{}%", format_fixed(r, 2))), "수익률")?,
            trend: Some(trend),
        },
        field(
            "총 평가금액",
            required(total_value.map(|v| format!("{}원", format_grouped(v))), "총 평가금액")?,
        ),
        field("내재가치", won(stock.intrinsic_value)),
        field("안전마진", safety_margin),
        field(
            "배당수익률",
            required(stock.dividend_yield.map(|d| format!("{}%", format_fixed(d, 2))), "배당수익률")?,
        ),
    ];

    Ok(WatchlistCard {
        code: stock.code.clone(),
        title: format!("{} ({})", name, stock.code),
        remove: RemoveControl {
            code: stock.code.clone(),
            stop_propagation: true,
        },
        return_pct,
        total_value,
        total_return_pct,
        trend,
        fields,
    })
}

fn field(label: &str, value: String) -> MetricField {
    MetricField {
        label: label.to_string(),
        value,
        trend: None,
    }
}

/// HTML card list for the web page container.
pub fn render_html(view: &WatchlistView) -> String {
    match view {
        WatchlistView::Empty { message } => {
            format!(r#"<div class="text-center text-muted">{}</div>"#, escape_html(message))
        }
        WatchlistView::Cards { cards } => cards.iter().map(render_card_html).collect(),
    }
}

/// Cards carry no inline script. The page wires one delegated listener that
/// reads `data-code` for the card toggle and `data-remove-code` for removal,
/// honouring `data-stop-propagation` on the removal control.
fn render_card_html(card: &WatchlistCard) -> String {
    let code = escape_html(&card.code);
    let remove_code = escape_html(&card.remove.code);

    let details: String = card
        .fields
        .iter()
        .map(|f| {
            let class = match f.trend {
                Some(t) if !t.css_class().is_empty() => format!("detail-value {}", t.css_class()),
                _ => "detail-value".to_string(),
            };
            format!(
                r#"
                <div class="detail-item">
                    <span class="detail-label">{}</span>
                    <span class="{}">{}</span>
                </div>"#,
                escape_html(&f.label),
                class,
                escape_html(&f.value)
            )
        })
        .collect();

    format!(
        r#"
<div class="col-12 mb-2">
    <div class="card stock-card" data-code="{code}">
        <div class="card-body p-3">
            <div class="d-flex align-items-center mb-2">
                <div class="heart-icon me-3" role="button" data-remove-code="{remove_code}" data-stop-propagation="{stop_propagation}">
                    <i class="fas fa-heart"></i>
                </div>
                <h6 class="card-title mb-0">{title}</h6>
            </div>
            <div class="stock-details">{details}
            </div>
        </div>
    </div>
</div>"#,
        code = code,
        remove_code = remove_code,
        stop_propagation = card.remove.stop_propagation,
        title = escape_html(&card.title),
        details = details,
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
