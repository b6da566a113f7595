pub mod settings;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the binary was asked to do, as read from its command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Serve requests, optionally from an explicit catalog file.
    Serve { catalog: Option<PathBuf> },
    /// Write the active configuration to a file and exit.
    ExportConfig(PathBuf),
    /// Replace the active configuration with a file's contents and exit.
    ImportConfig(PathBuf),
}

impl Invocation {
    /// Parses the arguments that follow the program name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let invocation = match (args.next(), args.next()) {
            (None, _) => Invocation::Serve { catalog: None },
            (Some(flag), Some(path)) if flag == "--export-config" => {
                Invocation::ExportConfig(PathBuf::from(path))
            }
            (Some(flag), Some(path)) if flag == "--import-config" => {
                Invocation::ImportConfig(PathBuf::from(path))
            }
            (Some(flag), None) if flag.starts_with("--") => {
                bail!("{flag} expects a file path")
            }
            (Some(catalog), None) => Invocation::Serve {
                catalog: Some(PathBuf::from(catalog)),
            },
            (Some(first), Some(_)) => bail!("Unexpected arguments after {first}"),
        };

        if let Some(extra) = args.next() {
            bail!("Unexpected argument: {extra}");
        }
        Ok(invocation)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserConfig {
    /// Prefix joined with each handler name to form its address.
    pub address_prefix: String,
    /// Depth used when `list_pack_contents` or `search` omit `max_depth`.
    pub default_max_depth: i64,
    /// Result cap used when `search` omits `max_results`.
    pub default_max_results: i64,
    /// Depth used by `search_and_load`, which takes no depth parameter.
    pub search_and_load_depth: i64,
    /// Catalog file served by the binary when none is given on the command line.
    pub catalog_path: Option<PathBuf>,
}

impl BrowserConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    /// Full address of the handler called `name`.
    pub fn address(&self, name: &str) -> String {
        format!("{}/{}", self.address_prefix.trim_end_matches('/'), name)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            address_prefix: "/live/browser".to_string(),
            default_max_depth: 10,
            default_max_results: 50,
            search_and_load_depth: 10,
            catalog_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation> {
        Invocation::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_invocation_defaults_to_serving() {
        assert_eq!(parse(&[]).unwrap(), Invocation::Serve { catalog: None });
        assert_eq!(
            parse(&["catalog.json"]).unwrap(),
            Invocation::Serve {
                catalog: Some(PathBuf::from("catalog.json"))
            }
        );
    }

    #[test]
    fn test_invocation_reads_config_transfer_flags() {
        assert_eq!(
            parse(&["--export-config", "out.json"]).unwrap(),
            Invocation::ExportConfig(PathBuf::from("out.json"))
        );
        assert_eq!(
            parse(&["--import-config", "in.json"]).unwrap(),
            Invocation::ImportConfig(PathBuf::from("in.json"))
        );
    }

    #[test]
    fn test_invocation_rejects_malformed_arguments() {
        assert!(parse(&["--export-config"]).is_err());
        assert!(parse(&["catalog.json", "extra.json"]).is_err());
        assert!(parse(&["--import-config", "in.json", "extra"]).is_err());
    }

    #[test]
    fn test_address_joins_prefix_and_name() {
        let mut config = BrowserConfig::default();
        assert_eq!(config.address("search"), "/live/browser/search");

        config.address_prefix = "/catalog/".to_string();
        assert_eq!(config.address("list_packs"), "/catalog/list_packs");
    }
}
