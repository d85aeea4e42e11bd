//! The optional user configuration file.
//!
//! The file is INI-formatted and lives at `~/.jiracli` unless
//! `JIRACLI_CONFIG` points elsewhere.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use tracing::debug;

use super::{ConfigError, Result};

/// File name of the configuration file inside the home directory.
pub const CONFIG_FILE_NAME: &str = ".jiracli";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV_VAR: &str = "JIRACLI_CONFIG";

const SERVER_SECTION: &str = "server";
const MISC_SECTION: &str = "misc";
const CUSTOM_FIELD_SECTION: &str = "customField";

/// Get the configuration file path, checking the environment variable first.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(CONFIG_FILE_NAME))
}

/// Parse an INI boolean (`1/yes/true/on`, `0/no/false/off`).
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a boolean, falling back to `default` on malformed input.
pub(crate) fn parse_bool_or(value: &str, default: bool) -> bool {
    parse_bool(value).unwrap_or_else(|| {
        debug!(value, default, "Unparseable boolean in configuration, using default");
        default
    })
}

/// Raw values read from the configuration file.
///
/// Keys that are absent stay `None`; nothing here is validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub version: Option<String>,
    pub debug: Option<String>,
    /// `(<key>.<attribute>, value)` pairs from `[customField]`, in file order.
    pub custom_field_entries: Vec<(String, String)>,
}

impl ConfigFile {
    /// Read the file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::ReadError(format!("{}: {}", path.display(), e)))
            }
        };
        Self::parse(&contents).map(Some)
    }

    /// Parse INI text.
    ///
    /// Values are taken verbatim: quotes and backslashes are not interpreted.
    pub fn parse(contents: &str) -> Result<Self> {
        let option = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(contents, option)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let get = |section: &str, key: &str| {
            ini.section(Some(section))
                .and_then(|props| props.get(key))
                .map(str::to_string)
        };

        let custom_field_entries = ini
            .section(Some(CUSTOM_FIELD_SECTION))
            .map(|props| {
                props
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            address: get(SERVER_SECTION, "address"),
            username: get(SERVER_SECTION, "username"),
            password: get(SERVER_SECTION, "password"),
            version: get(SERVER_SECTION, "version"),
            debug: get(MISC_SECTION, "debug"),
            custom_field_entries,
        }
    }
}
