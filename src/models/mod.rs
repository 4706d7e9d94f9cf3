pub mod export;
pub mod settings;
pub mod valuation;
pub mod view;
pub mod watchlist;
