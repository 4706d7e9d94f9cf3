pub mod export_service;
pub mod metrics;
pub mod notifier;
pub mod renderer;
pub mod valuation_client;
pub mod watchlist_store;
