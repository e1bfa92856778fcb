pub mod build;
pub mod config;
pub mod init;
mod interactive;
pub mod preview;
