//! Default configuration values - single source of truth

/// Default project directory (the current directory)
pub const PROJECT_DIR: &str = ".";

/// Default directory holding saved describe documents, relative to the project
pub const SNAPSHOT_DIR: &str = ".sfschema";

/// Name of the connection config file searched for in the project
pub const FORCE_CONFIG_FILE: &str = "force.json";

/// Whether to open the generated class in an editor by default
pub const OPEN_IN_EDITOR: bool = true;

/// Whether to read saved describe documents instead of logging in
pub const OFFLINE: bool = false;

/// Timeout for each request to the platform
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Directories never searched when looking for `force.json`
pub const SKIPPED_DIRS: &[&str] = &["node_modules", "target"];
