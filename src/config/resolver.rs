//! Layered configuration resolution.
//!
//! Precedence is defaults < configuration file < command-line flags. A
//! value present in the file is kept unless a flag supplies a replacement;
//! flags never unset anything.

use std::path::Path;

use tracing::{debug, error, warn, Span};

use super::custom_field::{parse_field_argument, CustomFieldMapping, FieldMap};
use super::file::{config_path, parse_bool_or, ConfigFile};
use super::settings::{ApiVersion, EffectiveConfiguration, Secret};
use super::{ConfigError, Result};

/// Values supplied on the command line.
///
/// `None` (or `false` for `debug`) means the flag was not given.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub debug: bool,
    pub api_version: Option<ApiVersion>,
}

/// Merges defaults, the configuration file and command-line flags.
#[derive(Debug)]
pub struct ConfigResolver {
    span: Span,
    address: Option<String>,
    username: Option<String>,
    password: Option<Secret>,
    api_version: ApiVersion,
    debug: bool,
    custom_fields: CustomFieldMapping,
}

impl ConfigResolver {
    /// Create a resolver holding only the built-in defaults.
    ///
    /// Every log event of the resolver is emitted inside `span`.
    pub fn new(span: Span) -> Self {
        Self {
            span,
            address: None,
            username: None,
            password: None,
            api_version: ApiVersion::default(),
            debug: false,
            custom_fields: CustomFieldMapping::default(),
        }
    }

    /// Load the user configuration file from its well-known path.
    ///
    /// A missing file is not an error.
    pub fn load(&mut self) -> Result<()> {
        let path = config_path()?;
        self.load_from(&path)
    }

    /// Load a configuration file from an explicit path.
    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        let _enter = self.span.clone().entered();
        match ConfigFile::read(path)? {
            Some(file) => {
                debug!(path = %path.display(), "Loaded configuration file");
                self.apply_file(file);
            }
            None => debug!(path = %path.display(), "No configuration file found"),
        }
        Ok(())
    }

    /// Apply values read from a configuration file over the current ones.
    pub fn apply_file(&mut self, file: ConfigFile) {
        let _enter = self.span.clone().entered();

        if let Some(address) = file.address {
            self.address = Some(address);
        }
        if let Some(username) = file.username {
            self.username = Some(username);
        }
        if let Some(password) = file.password {
            self.password = Some(Secret::new(password));
        }
        if let Some(debug) = file.debug {
            self.debug = parse_bool_or(&debug, self.debug);
        }
        if let Some(version) = file.version {
            match version.parse() {
                Ok(v) => self.api_version = v,
                Err(e) => warn!("{}; using JIRA version {}", e, self.api_version),
            }
        }

        self.custom_fields = CustomFieldMapping::from_entries(file.custom_field_entries);
        debug!(count = self.custom_fields.len(), "Custom fields configured");
    }

    /// Let command-line flags win over file values.
    ///
    /// Only flags that were given with a non-empty value are applied.
    pub fn apply_command_line_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(address) = non_empty(&overrides.address) {
            self.address = Some(address.to_string());
        }
        if let Some(username) = non_empty(&overrides.username) {
            self.username = Some(username.to_string());
        }
        if let Some(password) = non_empty(&overrides.password) {
            self.password = Some(Secret::new(password));
        }
        if overrides.debug {
            self.debug = true;
        }
        if let Some(version) = overrides.api_version {
            self.api_version = version;
        }
    }

    /// Check that the connection settings are complete.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when address, username or password is
    /// empty after merging.
    pub fn validate(&self) -> Result<EffectiveConfiguration> {
        let address = required(&self.address, "a server address", "-a")?;
        let username = required(&self.username, "a user name", "-u")?;
        let password = match &self.password {
            Some(p) if !p.is_empty() => p.clone(),
            _ => {
                return Err(ConfigError::Missing {
                    what: "a password",
                    flag: "-p",
                })
            }
        };

        Ok(EffectiveConfiguration {
            address,
            username,
            password,
            api_version: self.api_version,
            custom_fields: self.custom_fields.clone(),
            debug: self.debug,
        })
    }

    /// Whether debug output is currently requested.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// The configured custom field mapping.
    pub fn custom_fields(&self) -> &CustomFieldMapping {
        &self.custom_fields
    }

    /// Place a custom field value into `container`.
    ///
    /// Unknown keys and unsupported kinds are logged and skipped; the
    /// container is left unchanged. Returns whether the field was applied.
    pub fn resolve_custom_field(&self, key: &str, value: &str, container: &mut FieldMap) -> bool {
        let _enter = self.span.enter();
        match self.custom_fields.apply(key, value, container) {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Parse a `key=value` argument and resolve it as a custom field.
    pub fn resolve_custom_field_argument(&self, argument: &str, container: &mut FieldMap) -> bool {
        match parse_field_argument(argument) {
            Ok((key, value)) => self.resolve_custom_field(key, value, container),
            Err(e) => {
                let _enter = self.span.enter();
                error!("{}", e);
                false
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn required(value: &Option<String>, what: &'static str, flag: &'static str) -> Result<String> {
    non_empty(value)
        .map(str::to_string)
        .ok_or(ConfigError::Missing { what, flag })
}
