//! Configuration read from the process environment.

pub mod expiration_config;

pub use expiration_config::{
    ExpirationConfig, SERVE_REMOVED_APIS_FOR_ONE_RELEASE_ENV,
    STRICT_REMOVED_API_HANDLING_IN_ALPHA_ENV,
};

/// Parse a boolean the way command-line flags accept them:
/// `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("parsing {:?}: invalid syntax", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn accepts_flag_style_booleans() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(v), Ok(true), "{}", v);
        }
        for v in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(v), Ok(false), "{}", v);
        }
        assert!(parse_bool("yes").is_err());
        assert!(parse_bool("").is_err());
        assert!(parse_bool("tRUE").is_err());
    }
}
