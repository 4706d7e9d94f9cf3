use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::valuation::{StockSearchHit, Valuation};
use crate::utils::http::{build_valuation_client, endpoint_url};

const SEARCH_PATH: &str = "/search";
const CALCULATE_PATH: &str = "/calculate";

/// 내재가치 계산 서버 (`/search`, `/calculate`) 클라이언트
pub struct ValuationClient {
    client: reqwest::Client,
    base_url: String,
}

/// The server answers either with the payload or with `{"error": "..."}`,
/// both as HTTP 200.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServerReply<T> {
    Failure { error: String },
    Success(T),
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    results: Vec<StockSearchHit>,
}

impl ValuationClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_valuation_client()?,
            base_url: base_url.to_string(),
        })
    }

    /// 종목명으로 종목코드 검색
    pub async fn search(&self, company_name: &str) -> Result<Vec<StockSearchHit>> {
        let payload: SearchPayload = self
            .post_form(SEARCH_PATH, &[("company_name", company_name)])
            .await?;
        Ok(payload.results)
    }

    /// 현재가 / 내재가치 / 안전마진 조회
    pub async fn calculate(&self, ticker: &str) -> Result<Valuation> {
        self.post_form(CALCULATE_PATH, &[("ticker", ticker)]).await
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: &[(&str, &str)]) -> Result<T> {
        let url = endpoint_url(&self.base_url, path);
        let resp = self.client.post(&url).form(form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("{} returned {}", path, status));
        }
        let text = resp.text().await?;
        parse_reply(&text)
    }
}

fn parse_reply<T: DeserializeOwned>(text: &str) -> Result<T> {
    let reply: ServerReply<T> = serde_json::from_str(text)
        .map_err(|e| anyhow!("응답 파싱 실패: {}", e))?;
    match reply {
        ServerReply::Success(payload) => Ok(payload),
        ServerReply::Failure { error } => Err(anyhow!(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_results() {
        let payload: SearchPayload = parse_reply(
            r#"{"results":[{"code":"005930","name":"삼성전자"},{"code":"005935","name":"삼성전자우"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.results.len(), 2);
        assert_eq!(payload.results[1].name, "삼성전자우");
    }

    #[test]
    fn test_parse_error_reply() {
        let err = parse_reply::<SearchPayload>(r#"{"error":"검색 결과가 없습니다."}"#).unwrap_err();
        assert_eq!(err.to_string(), "검색 결과가 없습니다.");

        let err = parse_reply::<Valuation>(r#"{"error":"재무 데이터를 가져올 수 없습니다."}"#).unwrap_err();
        assert!(err.to_string().contains("재무 데이터"));
    }

    #[test]
    fn test_parse_valuation_reply() {
        let v: Valuation = parse_reply(
            r#"{"stock_name":"카카오","current_price":41000.0,"intrinsic_value":30000.0,"safety_margin":-26.8,"treasury_stock":{"shares":0,"ratio":0},"financial_data":[]}"#,
        )
        .unwrap();
        assert_eq!(v.stock_name, "카카오");
        assert_eq!(v.safety_margin, Some(-26.8));
    }
}
