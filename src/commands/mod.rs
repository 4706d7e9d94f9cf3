pub mod settings_cmd;
pub mod stock_cmd;
pub mod watchlist_cmd;
