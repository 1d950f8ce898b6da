use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use gravatar_core::{
    AvatarOptions, AvatarResolver, BaseUrl, CoreError, DefaultImage, DigestSource, HashDigest,
    Rating,
};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "gravatar";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: BaseUrl,
    pub digest: DigestSource,
    pub options: AvatarOptions,
}

impl AppConfig {
    pub fn resolver(&self) -> AvatarResolver {
        AvatarResolver::new()
            .with_base_url(self.base_url.clone())
            .with_source(self.digest)
            .with_options(self.options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestSourceKind {
    Computed,
    Pinned,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config field base_url: {0}")]
    InvalidBaseUrl(#[source] CoreError),
    #[error("config field digest.pinned: {0}")]
    InvalidPinnedDigest(#[source] CoreError),
    #[error("digest.pinned is set but digest.source is \"computed\"")]
    UnusedPinnedDigest,
    #[error("config field options.size: {0}")]
    InvalidSize(#[source] CoreError),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    digest: Option<DigestFile>,
    options: Option<OptionsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DigestFile {
    source: Option<DigestSourceKind>,
    pinned: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    size: Option<u32>,
    default_image: Option<DefaultImage>,
    rating: Option<Rating>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(raw) = parsed.base_url {
        config.base_url = BaseUrl::new(&raw).map_err(ConfigError::InvalidBaseUrl)?;
    }

    if let Some(digest) = parsed.digest {
        let pinned = digest
            .pinned
            .map(|raw| raw.parse::<HashDigest>())
            .transpose()
            .map_err(ConfigError::InvalidPinnedDigest)?;
        config.digest = match (digest.source, pinned) {
            (Some(DigestSourceKind::Pinned), Some(pinned)) => DigestSource::Pinned(pinned),
            (Some(DigestSourceKind::Pinned), None) => DigestSource::placeholder(),
            (Some(DigestSourceKind::Computed), Some(_)) => {
                return Err(ConfigError::UnusedPinnedDigest)
            }
            // A bare digest pins it.
            (None, Some(pinned)) => DigestSource::Pinned(pinned),
            (Some(DigestSourceKind::Computed), None) | (None, None) => DigestSource::Computed,
        };
    }

    if let Some(options) = parsed.options {
        let mut merged = AvatarOptions::default();
        if let Some(size) = options.size {
            merged = merged.with_size(size).map_err(ConfigError::InvalidSize)?;
        }
        if let Some(image) = options.default_image {
            merged = merged.with_default_image(image);
        }
        if let Some(rating) = options.rating {
            merged = merged.with_rating(rating);
        }
        config.options = merged;
    }

    Ok(config)
}
