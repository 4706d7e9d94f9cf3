use serde::{Deserialize, Serialize};

pub const EMPTY_WATCHLIST_MESSAGE: &str = "관심종목이 없습니다.";

/// 관심종목 화면 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WatchlistView {
    Empty { message: String },
    Cards { cards: Vec<WatchlistCard> },
}

impl WatchlistView {
    pub fn empty() -> Self {
        WatchlistView::Empty {
            message: EMPTY_WATCHLIST_MESSAGE.to_string(),
        }
    }

    pub fn cards(&self) -> &[WatchlistCard] {
        match self {
            WatchlistView::Empty { .. } => &[],
            WatchlistView::Cards { cards } => cards,
        }
    }
}

/// 종목 카드 한 장
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistCard {
    pub code: String,
    pub title: String,
    pub remove: RemoveControl,
    pub return_pct: Option<f64>,
    pub total_value: Option<f64>,
    pub total_return_pct: Option<f64>,
    pub trend: Trend,
    pub fields: Vec<MetricField>,
}

impl WatchlistCard {
    pub fn field(&self, label: &str) -> Option<&MetricField> {
        self.fields.iter().find(|f| f.label == label)
    }
}

/// Removal control on a card. Activating it must not reach the card's own
/// click handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveControl {
    pub code: String,
    pub stop_propagation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricField {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "up")]
    Up,
    #[serde(rename = "down")]
    Down,
    #[serde(rename = "flat")]
    Flat,
}

impl Trend {
    pub fn from_value(value: Option<f64>) -> Self {
        match value {
            Some(v) if v > 0.0 => Trend::Up,
            Some(v) if v < 0.0 => Trend::Down,
            _ => Trend::Flat,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Up => "text-success",
            Trend::Down => "text-danger",
            Trend::Flat => "",
        }
    }
}
