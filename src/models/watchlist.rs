use serde::{Deserialize, Serialize};

use super::valuation::Valuation;

/// 관심종목 저장 항목 (로컬 저장소에는 종목코드만 남긴다)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub code: String,
}

impl WatchlistItem {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// 화면 표시용 종목 데이터. 호출자가 채워서 넘긴다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayStock {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intrinsic_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
}

impl DisplayStock {
    /// A record carrying nothing but the ticker code.
    pub fn bare(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    /// Overwrites the market-derived fields with a fresh valuation.
    /// Purchase data and dividend yield stay as the caller supplied them.
    pub fn merge_valuation(&mut self, valuation: &Valuation) {
        if !valuation.stock_name.is_empty() {
            self.name = Some(valuation.stock_name.clone());
        }
        if valuation.current_price.is_some() {
            self.current_price = valuation.current_price;
        }
        if valuation.intrinsic_value.is_some() {
            self.intrinsic_value = valuation.intrinsic_value;
        }
        if let Some(margin) = valuation.effective_safety_margin() {
            self.safety_margin = Some(margin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_stock_skips_absent_fields() {
        let stock = DisplayStock {
            code: "005930".to_string(),
            current_price: Some(71000.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&stock).unwrap();
        assert_eq!(json["code"], "005930");
        assert_eq!(json["current_price"], 71000.0);
        assert!(json.get("purchase_price").is_none());
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_display_stock_accepts_partial_json() {
        let stock: DisplayStock =
            serde_json::from_str(r#"{"code":"000660","purchase_price":100,"name":"SK하이닉스"}"#).unwrap();
        assert_eq!(stock.name.as_deref(), Some("SK하이닉스"));
        assert_eq!(stock.purchase_price, Some(100.0));
        assert_eq!(stock.current_price, None);
    }

    #[test]
    fn test_merge_valuation_keeps_purchase_fields() {
        let mut stock = DisplayStock {
            code: "006125".to_string(),
            purchase_price: Some(50000.0),
            purchase_quantity: Some(10.0),
            dividend_yield: Some(2.5),
            ..Default::default()
        };
        let valuation = Valuation {
            stock_name: "영원무역홀딩스".to_string(),
            current_price: Some(80000.0),
            intrinsic_value: Some(120000.0),
            safety_margin: None,
            ..Default::default()
        };
        stock.merge_valuation(&valuation);

        assert_eq!(stock.name.as_deref(), Some("영원무역홀딩스"));
        assert_eq!(stock.purchase_price, Some(50000.0));
        assert_eq!(stock.purchase_quantity, Some(10.0));
        assert_eq!(stock.dividend_yield, Some(2.5));
        assert_eq!(stock.current_price, Some(80000.0));
        assert_eq!(stock.safety_margin, Some(50.0));
    }
}
