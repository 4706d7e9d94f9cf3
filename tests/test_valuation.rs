//! 내재가치 서버 (/search, /calculate) 통합 테스트
//!
//! 로컬 axum 서버로 폼 필드, `{error}` 응답 처리, 관심종목 보강 순서를 확인한다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use app_lib::commands::{settings_cmd, stock_cmd, watchlist_cmd};
use app_lib::models::watchlist::DisplayStock;
use app_lib::services::valuation_client::ValuationClient;
use app_lib::AppState;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

type Forms = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

async fn search_handler(
    State(forms): State<Forms>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let name = form.get("company_name").cloned().unwrap_or_default();
    forms.lock().unwrap().push(("/search".to_string(), form));
    match name.as_str() {
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "없는회사" => Json(json!({"error": "검색 결과가 없습니다."})).into_response(),
        _ => Json(json!({"results": [
            {"code": "005930", "name": "삼성전자"},
            {"code": "005935", "name": "삼성전자우"}
        ]}))
        .into_response(),
    }
}

async fn calculate_handler(
    State(forms): State<Forms>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let ticker = form.get("ticker").cloned().unwrap_or_default();
    forms.lock().unwrap().push(("/calculate".to_string(), form));
    if ticker == "FAIL" {
        return Json(json!({"error": "재무 데이터를 가져올 수 없습니다."})).into_response();
    }
    Json(json!({
        "stock_name": format!("종목{}", ticker),
        "current_price": 100.0,
        "intrinsic_value": 150.0,
        "safety_margin": 50.0,
        "treasury_stock": {"shares": 0, "ratio": 0},
        "financial_data": []
    }))
    .into_response()
}

async fn spawn_valuation_server() -> (String, Forms) {
    let forms: Forms = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/search", post(search_handler))
        .route("/calculate", post(calculate_handler))
        .with_state(forms.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), forms)
}

#[tokio::test]
async fn test_search_sends_company_name_form() {
    let (url, forms) = spawn_valuation_server().await;
    let client = ValuationClient::new(&url).unwrap();

    let hits = client.search("삼성").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].code, "005930");

    let forms = forms.lock().unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].0, "/search");
    assert_eq!(forms[0].1.get("company_name").map(String::as_str), Some("삼성"));
}

#[tokio::test]
async fn test_search_error_reply_and_server_failure() {
    let (url, _forms) = spawn_valuation_server().await;
    let client = ValuationClient::new(&url).unwrap();

    let err = client.search("없는회사").await.unwrap_err();
    assert_eq!(err.to_string(), "검색 결과가 없습니다.");

    let err = client.search("boom").await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_calculate_sends_ticker_form() {
    let (url, forms) = spawn_valuation_server().await;
    let client = ValuationClient::new(&url).unwrap();

    let valuation = client.calculate("006125").await.unwrap();
    assert_eq!(valuation.stock_name, "종목006125");
    assert_eq!(valuation.intrinsic_value, Some(150.0));

    let err = client.calculate("FAIL").await.unwrap_err();
    assert!(err.to_string().contains("재무 데이터"));

    let forms = forms.lock().unwrap();
    assert_eq!(forms[0].0, "/calculate");
    assert_eq!(forms[0].1.get("ticker").map(String::as_str), Some("006125"));
    assert_eq!(forms[1].1.get("ticker").map(String::as_str), Some("FAIL"));
}

#[tokio::test]
async fn test_enrichment_keeps_order_and_falls_back() {
    let (url, _forms) = spawn_valuation_server().await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(dir.path().to_path_buf()).unwrap();
    settings_cmd::update_settings(&state, |s| s.server_url = url.clone()).unwrap();

    for code in ["B", "FAIL", "A"] {
        watchlist_cmd::add_watchlist_stock(&state, code.to_string()).unwrap();
    }
    let supplied = vec![
        DisplayStock {
            code: "A".to_string(),
            purchase_price: Some(80.0),
            purchase_quantity: Some(10.0),
            dividend_yield: Some(1.5),
            ..Default::default()
        },
        DisplayStock {
            code: "FAIL".to_string(),
            name: Some("직접입력".to_string()),
            current_price: Some(42.0),
            ..Default::default()
        },
        DisplayStock::bare("not-in-watchlist"),
    ];

    let enriched = stock_cmd::get_watchlist_enriched(&state, supplied).await.unwrap();

    let codes: Vec<&str> = enriched.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["B", "FAIL", "A"]);

    // no supplied data: server fields only
    assert_eq!(enriched[0].name.as_deref(), Some("종목B"));
    assert_eq!(enriched[0].purchase_price, None);

    // calculate failed: supplied record kept as is
    assert_eq!(enriched[1].name.as_deref(), Some("직접입력"));
    assert_eq!(enriched[1].current_price, Some(42.0));
    assert_eq!(enriched[1].intrinsic_value, None);

    // supplied purchase data merged with server valuation
    assert_eq!(enriched[2].name.as_deref(), Some("종목A"));
    assert_eq!(enriched[2].purchase_price, Some(80.0));
    assert_eq!(enriched[2].dividend_yield, Some(1.5));
    assert_eq!(enriched[2].current_price, Some(100.0));
    assert_eq!(enriched[2].safety_margin, Some(50.0));
}

#[tokio::test]
async fn test_blank_search_skips_request() {
    let (url, forms) = spawn_valuation_server().await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(dir.path().to_path_buf()).unwrap();
    settings_cmd::update_settings(&state, |s| s.server_url = url.clone()).unwrap();

    let hits = stock_cmd::search_stocks(&state, "   ".to_string()).await.unwrap();
    assert!(hits.is_empty());
    assert!(forms.lock().unwrap().is_empty());
}
