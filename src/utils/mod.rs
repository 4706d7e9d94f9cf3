pub mod format;
pub mod http;
