use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    report::{ExtractionMode, MalformedSectionPolicy, ParseOptions},
    source::Encoding,
};

/// Settings that control how reports are read and parsed.
///
/// The configuration lives in a `sigra.toml` file. Every field is optional;
/// a missing file yields the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Encoding of the exported report files.
    pub encoding: Encoding,

    /// What to do with a section whose fields cannot be extracted.
    pub on_malformed_section: MalformedSectionPolicy,

    /// How plain continuation lines of the offering report are split.
    pub extraction: ExtractionMode,

    /// Whether enrollment averages leave out summer terms.
    pub ignore_summer: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            on_malformed_section: MalformedSectionPolicy::default(),
            extraction: ExtractionMode::default(),
            ignore_summer: default_ignore_summer(),
        }
    }
}

/// Errors that can occur when loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a valid configuration.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// The file that was being parsed.
        path: PathBuf,
        /// The underlying TOML error.
        source: toml::de::Error,
    },
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration at the given path, or the defaults if there is
    /// no file there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// The parser settings carried by this configuration.
    #[must_use]
    pub const fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            on_malformed_section: self.on_malformed_section,
            extraction: self.extraction,
        }
    }
}

const fn default_ignore_summer() -> bool {
    true
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        encoding: Encoding,

        #[serde(default)]
        on_malformed_section: MalformedSectionPolicy,

        #[serde(default)]
        extraction: ExtractionMode,

        #[serde(default = "default_ignore_summer")]
        ignore_summer: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                encoding,
                on_malformed_section,
                extraction,
                ignore_summer,
            } => Self {
                encoding,
                on_malformed_section,
                extraction,
                ignore_summer,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            encoding: config.encoding,
            on_malformed_section: config.on_malformed_section,
            extraction: config.extraction,
            ignore_summer: config.ignore_summer,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nencoding = \"latin-1\"\non_malformed_section = \"skip\"\nextraction = \"offset\"\nignore_summer = false\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.encoding, Encoding::Latin1);
        assert_eq!(config.on_malformed_section, MalformedSectionPolicy::Skip);
        assert_eq!(config.extraction, ExtractionMode::Offset);
        assert!(!config.ignore_summer);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("sigra.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&tmp.path().join("sigra.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nencoding = \"ebcdic\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert!(actual.ignore_summer);
    }

    #[test]
    fn saved_form_is_versioned() {
        let text = toml::to_string(&Config::default()).unwrap();
        assert!(text.contains(r#"_version = "1""#));
        let reloaded: Config = toml::from_str(&text).unwrap();
        assert_eq!(reloaded, Config::default());
    }
}
