use crate::config::toml_config::{Backend, StoreConfig};
use crate::core::ItemId;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cart-store")]
#[command(about = "Manage a locally persisted shopping cart")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the cart file")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, help = "Storage slot name (default: cart)")]
    pub slot: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CartCommand {
    /// Add one of an item
    Add { item: String },
    /// Remove one of an item
    Remove { item: String },
    /// Remove every unit of an item
    RemoveAll { item: String },
    /// Delete the stored cart
    Clear,
    /// Print the cart contents
    Show,
    /// Run the scripted walkthrough
    Demo,
}

impl CartCommand {
    pub fn item(&self) -> Option<Result<ItemId>> {
        match self {
            CartCommand::Add { item }
            | CartCommand::Remove { item }
            | CartCommand::RemoveAll { item } => Some(ItemId::parse(item)),
            CartCommand::Clear | CartCommand::Show | CartCommand::Demo => None,
        }
    }
}

impl CliConfig {
    /// Loads the TOML file if one was given and applies command-line
    /// overrides on top.
    pub fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.store.backend = Backend::File;
            config.store.path = Some(dir.clone());
        }
        if let Some(slot) = &self.slot {
            config.store.slot = Some(slot.clone());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = CliConfig::parse_from(["cart-store", "add", "42"]);
        assert!(matches!(cli.command, CartCommand::Add { ref item } if item == "42"));
        assert_eq!(cli.command.item().unwrap().unwrap(), ItemId::numeric(42));

        let cli = CliConfig::parse_from(["cart-store", "remove-all", "abc", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, CartCommand::RemoveAll { .. }));

        let cli = CliConfig::parse_from(["cart-store", "show"]);
        assert!(cli.command.item().is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let cli = CliConfig::parse_from([
            "cart-store",
            "--data-dir",
            "/tmp/carts",
            "--slot",
            "basket",
            "clear",
        ]);
        let config = cli.store_config().unwrap();

        assert_eq!(config.store.backend, Backend::File);
        assert_eq!(config.store.path.as_deref(), Some("/tmp/carts"));
        assert_eq!(config.slot(), "basket");
    }

    #[test]
    fn test_blank_item_rejected() {
        let cli = CliConfig::parse_from(["cart-store", "add", "  "]);
        assert!(cli.command.item().unwrap().is_err());
    }
}
