pub mod database;
pub mod local_storage;
