use serde::Serialize;

use super::watchlist::DisplayStock;

/// `/watchlist/export` 요청 본문
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest<'a> {
    pub stocks: &'a [DisplayStock],
    pub dividend_filter: Option<f64>,
    pub limit: u32,
}

/// 엑셀 파일명: 안전마진_상위{limit}종목[_배당수익률{filter}%이상].xlsx
///
/// A zero filter counts as "no filter" for the name, matching how the web
/// page built it, while the request body still carries the zero.
pub fn export_file_name(limit: u32, dividend_filter: Option<f64>) -> String {
    let suffix = match dividend_filter {
        Some(f) if f != 0.0 && !f.is_nan() => format!("_배당수익률{}%이상", f),
        _ => String::new(),
    };
    format!("안전마진_상위{}종목{}.xlsx", limit, suffix)
}
