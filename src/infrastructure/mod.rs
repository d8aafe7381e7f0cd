pub mod crypto;
pub mod database;
pub mod storage;
