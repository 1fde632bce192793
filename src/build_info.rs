//! Build information captured at compile time.

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git commit hash (7 chars), or `unknown` outside a git checkout.
pub const BUILD_HASH: &str = env!("BUILD_HASH");

const BUILD_DIRTY_STR: &str = env!("BUILD_DIRTY");

/// Short version for the TUI footer.
///
/// Format: `v0.1.0 abc1234` or `v0.1.0 abc1234*` if built from a dirty tree.
#[must_use]
pub fn short_version() -> String {
    let dirty = if BUILD_DIRTY_STR == "true" { "*" } else { "" };
    format!("v{VERSION} {BUILD_HASH}{dirty}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_version_starts_with_package_version() {
        assert!(short_version().starts_with(&format!("v{VERSION} ")));
    }
}
