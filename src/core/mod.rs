pub mod contacts;
pub mod dial_log;
