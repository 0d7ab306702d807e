//! Application-wide constants

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const LOG_FILE_PREFIX: &str = "menu-server.log";
