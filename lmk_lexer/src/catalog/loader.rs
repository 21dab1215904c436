//! Catalog file loading
//!
//! Catalogs live in TOML files: each top-level array-of-tables key is a
//! category, each table one token type record.
//!
//! ```toml
//! [[number]]
//! name = "NUM"
//! id = 1
//! regexes = ["^[0-9]+$"]
//!
//! [[delimiter]]
//! name = "LANGLE"
//! id = 10
//! symbol = "<"
//! ```

use super::error::ConfigError;
use super::record::Catalog;
use super::registry::TokenTypeRegistry;
use crate::log_success;
use crate::logging::codes;
use std::path::Path;

/// Parse a catalog from TOML text
pub fn parse_catalog(text: &str) -> Result<Catalog, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::Parse {
        reason: e.to_string(),
    })
}

/// Load a catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_catalog(&text)
}

/// Load a catalog file and build the registry from it
pub fn load_registry(path: &Path) -> Result<TokenTypeRegistry, ConfigError> {
    let catalog = load_catalog(path)?;
    let registry = TokenTypeRegistry::from_catalog(&catalog)?;

    log_success!(codes::success::CATALOG_LOADED, "Catalog loaded",
        "path" => path.display(),
        "categories" => catalog.len(),
        "types" => registry.len()
    );

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    const SAMPLE: &str = r#"
[[number]]
name = "num"
id = 1
regexes = ["^[0-9]+$"]

[[text]]
name = "WORD"
id = "2"
regexes = ["^[a-z]+$"]
help = "plain lowercase words"

[[delimiter]]
name = "LANGLE"
id = 10
symbol = "<"

[[delimiter]]
name = "COMMENT_OPEN"
id = 11
symbol = "<~"
"#;

    #[test]
    fn test_parse_catalog_groups_by_category() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog["delimiter"].len(), 2);
        assert_eq!(catalog["number"][0].name.as_deref(), Some("num"));
    }

    #[test]
    fn test_registry_from_parsed_catalog() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let registry = TokenTypeRegistry::from_catalog(&catalog).unwrap();

        // names are uppercased, string ids resolved
        assert_eq!(registry.get("NUM").unwrap().id(), 1);
        assert_eq!(registry.get("word").unwrap().id(), 2);
        assert_eq!(registry.get("WORD").unwrap().help(), Some("plain lowercase words"));
        assert!(registry.get("LANGLE").unwrap().lookup("<", None));
    }

    #[test]
    fn test_parse_error_is_config_error() {
        assert_matches!(parse_catalog("not [ valid ["), Err(ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let registry = load_registry(file.path()).unwrap();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let missing = Path::new("/nonexistent/catalog.toml");
        assert_matches!(load_catalog(missing), Err(ConfigError::FileRead { .. }));
    }
}
