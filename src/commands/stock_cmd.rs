use crate::models::valuation::StockSearchHit;
use crate::models::watchlist::DisplayStock;
use crate::services::valuation_client::ValuationClient;
use crate::AppState;

pub async fn search_stocks(
    state: &AppState,
    company_name: String,
) -> Result<Vec<StockSearchHit>, String> {
    let company_name = company_name.trim().to_string();
    if company_name.is_empty() {
        return Ok(vec![]);
    }
    let settings = state.db.load_settings().map_err(|e| e.to_string())?;
    let client = ValuationClient::new(&settings.server_url).map_err(|e| e.to_string())?;
    client.search(&company_name).await.map_err(|e| e.to_string())
}

/// 관심종목 순서대로 표시 데이터를 만든다. 호출자가 준 매입 정보에 서버의
/// 현재가 / 내재가치 / 안전마진을 덧붙인다.
pub async fn get_watchlist_enriched(
    state: &AppState,
    supplied: Vec<DisplayStock>,
) -> Result<Vec<DisplayStock>, String> {
    let codes: Vec<String> = {
        let store = state.watchlist().map_err(|e| e.to_string())?;
        store.list().iter().map(|i| i.code.clone()).collect()
    };
    if codes.is_empty() {
        return Ok(vec![]);
    }

    let settings = state.db.load_settings().map_err(|e| e.to_string())?;
    let client = ValuationClient::new(&settings.server_url).map_err(|e| e.to_string())?;

    let mut enriched = Vec::with_capacity(codes.len());
    for code in codes {
        let mut stock = supplied
            .iter()
            .find(|s| s.code == code)
            .cloned()
            .unwrap_or_else(|| DisplayStock::bare(code.clone()));
        match client.calculate(&code).await {
            Ok(valuation) => stock.merge_valuation(&valuation),
            Err(e) => log::warn!("{} 내재가치 조회 실패: {}", code, e),
        }
        enriched.push(stock);
    }
    Ok(enriched)
}
