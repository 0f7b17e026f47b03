pub mod check;
pub mod config;
pub mod count;
pub mod init;
pub mod thresholds;
