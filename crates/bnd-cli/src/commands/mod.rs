pub mod config;
pub mod dispatch;
pub mod download;
pub mod rename;
pub mod sessions;
pub mod shared;
pub mod upload;
pub mod validate;
