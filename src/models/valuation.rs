use serde::{Deserialize, Serialize};

/// 종목 검색 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSearchHit {
    pub code: String,
    pub name: String,
}

/// 자사주 보유 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreasuryStock {
    #[serde(default)]
    pub shares: f64,
    #[serde(default)]
    pub ratio: f64,
}

/// 기간별 재무지표 (3년전 / 2년전 / 직전년도)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    pub period: String,
    #[serde(rename = "PBR", default)]
    pub pbr: Option<f64>,
    #[serde(rename = "EPS", default)]
    pub eps: Option<f64>,
    #[serde(rename = "BPS", default)]
    pub bps: Option<f64>,
}

/// 내재가치 계산 결과 (`/calculate` 응답)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    #[serde(default)]
    pub stock_name: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub intrinsic_value: Option<f64>,
    #[serde(default)]
    pub safety_margin: Option<f64>,
    #[serde(default)]
    pub treasury_stock: Option<TreasuryStock>,
    #[serde(default)]
    pub financial_data: Vec<FinancialPeriod>,
}

impl Valuation {
    /// Safety margin as reported, or derived from the two prices when the
    /// backend left it out.
    pub fn effective_safety_margin(&self) -> Option<f64> {
        if self.safety_margin.is_some() {
            return self.safety_margin;
        }
        match (self.intrinsic_value, self.current_price) {
            (Some(intrinsic), Some(current)) if current != 0.0 && intrinsic != 0.0 => {
                Some((intrinsic - current) / current * 100.0)
            }
            _ => None,
        }
    }
}
