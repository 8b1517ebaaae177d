pub mod config;
pub mod init;
pub mod presence;
pub mod report;
pub mod watch;
