pub mod db;
pub mod errors;
pub mod form;
pub mod helpers;
pub mod kv;
pub mod static_server;
