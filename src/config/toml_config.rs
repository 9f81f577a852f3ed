use crate::adapters::{FileStore, MemoryStore};
use crate::core::{CartStore, KeyValueStore, DEFAULT_SLOT};
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_DIR: &str = "./.cart-store";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_data_dir")]
    pub path: Option<String>,
    pub slot: Option<String>,
}

fn default_data_dir() -> Option<String> {
    Some(DEFAULT_DATA_DIR.to_string())
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            path: default_data_dir(),
            slot: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
}

impl StoreConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values. Unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn slot(&self) -> &str {
        self.store.slot.as_deref().unwrap_or(DEFAULT_SLOT)
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.store.backend == Backend::File {
            let path = validation::validate_required_field("store.path", &self.store.path)?;
            validation::validate_path("store.path", path)?;
        }

        validation::validate_slot_name("store.slot", self.slot())
    }

    /// Validates the configuration and opens the configured backend.
    pub fn open(&self) -> Result<CartStore<Box<dyn KeyValueStore>>> {
        self.validate_config()?;

        let backend: Box<dyn KeyValueStore> = match self.store.backend {
            Backend::File => {
                let path = validation::validate_required_field("store.path", &self.store.path)?;
                tracing::debug!(path = %path, "Using file-backed cart store");
                Box::new(FileStore::new(path))
            }
            Backend::Memory => {
                tracing::debug!("Using in-memory cart store");
                Box::new(MemoryStore::new())
            }
        };

        Ok(CartStore::with_slot(backend, self.slot()))
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItemId;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[store]
backend = "memory"
slot = "basket"

[logging]
json = true
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.store.backend, Backend::Memory);
        assert_eq!(config.slot(), "basket");
        assert!(config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();

        assert_eq!(config.store.backend, Backend::File);
        assert_eq!(config.store.path.as_deref(), Some(DEFAULT_DATA_DIR));
        assert_eq!(config.slot(), "cart");
        assert!(!config.json_logging());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CART_STORE_TEST_DIR", "/tmp/cart-test");

        let toml_content = r#"
[store]
backend = "file"
path = "${CART_STORE_TEST_DIR}/data"
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store.path.as_deref(), Some("/tmp/cart-test/data"));

        std::env::remove_var("CART_STORE_TEST_DIR");
    }

    #[test]
    fn test_unknown_env_var_left_verbatim() {
        let toml_content = r#"
[store]
path = "${CART_STORE_SURELY_UNSET_VAR}"
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.store.path.as_deref(),
            Some("${CART_STORE_SURELY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_store_table_without_path_uses_default_dir() {
        let config = StoreConfig::from_toml_str(
            r#"
[store]
slot = "basket"
"#,
        )
        .unwrap();

        assert_eq!(config.store.backend, Backend::File);
        assert_eq!(config.store.path.as_deref(), Some(DEFAULT_DATA_DIR));
        assert_eq!(config.slot(), "basket");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut missing_path = StoreConfig::default();
        missing_path.store.path = None;
        assert!(matches!(
            missing_path.validate(),
            Err(CartError::MissingConfigError { .. })
        ));

        let bad_slot = StoreConfig::from_toml_str(
            r#"
[store]
backend = "memory"
slot = "../etc"
"#,
        )
        .unwrap();
        assert!(bad_slot.validate().is_err());

        assert!(StoreConfig::from_toml_str("[store]\nbackend = \"s3\"").is_err());
    }

    #[test]
    fn test_config_from_file_opens_store() {
        let data_dir = TempDir::new().unwrap();
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = format!(
            "[store]\nbackend = \"file\"\npath = \"{}\"\n",
            data_dir.path().to_str().unwrap().replace('\\', "/")
        );
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = StoreConfig::from_file(temp_file.path()).unwrap();
        let mut store = config.open().unwrap();
        store.add_one(&ItemId::numeric(3)).unwrap();

        assert!(data_dir.path().join("cart.json").exists());
    }
}
