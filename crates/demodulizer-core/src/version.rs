/// Program name shown by `demodulizer version`.
pub const NAME: &str = "demodulizer";

/// Crate version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `<name> <version>`, as printed by `demodulizer version`.
#[must_use]
pub fn version_string() -> String {
    format!("{NAME} {VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        assert!(!VERSION.is_empty());
        assert_eq!(version_string(), format!("demodulizer {VERSION}"));
    }
}
