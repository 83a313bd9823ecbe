/// Reads a variable exported by `build.rs`, falling back to `"unknown"`.
macro_rules! build_env {
    ($name:literal) => {
        match option_env!(concat!("EXPENSE_LEDGER_BUILD_", $name)) {
            Some(value) => value,
            None => "unknown",
        }
    };
}

/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub const BUILD: BuildMetadata = BuildMetadata {
    version: env!("CARGO_PKG_VERSION"),
    git_hash: build_env!("HASH"),
    git_status: build_env!("STATUS"),
    timestamp: build_env!("TIMESTAMP"),
    target: build_env!("TARGET"),
    profile: build_env!("PROFILE"),
    rustc: build_env!("RUSTC"),
};

impl BuildMetadata {
    /// Label/value pairs in display order.
    pub fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("Build hash", format!("{} ({})", self.git_hash, self.git_status)),
            ("Built at", self.timestamp.to_string()),
            ("Target", self.target.to_string()),
            ("Profile", self.profile.to_string()),
            ("Rustc", self.rustc.to_string()),
        ]
    }
}
