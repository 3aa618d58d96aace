use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_POLLYTTS_REGION: &str = "POLLYTTS_REGION";
pub const ENV_POLLYTTS_OUTPUT_DIR: &str = "POLLYTTS_OUTPUT_DIR";
pub const ENV_POLLYTTS_KEY_FILE: &str = "POLLYTTS_KEY_FILE";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region(String);

impl Region {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, ConfigError> {
        let v = value.into();
        if v.trim().is_empty() {
            return Err(ConfigError::EmptyRegion);
        }
        Ok(Self(v))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(DEFAULT_REGION.to_owned())
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SecretAccessKey(String);

impl SecretAccessKey {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretAccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretAccessKey(**redacted**)")
    }
}

/// Plugin configuration as handed over by the host. Field names follow the
/// host's JSON shape.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PollyTtsConfig {
    /// Directory the audio files are written to.
    pub path: Option<PathBuf>,
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<SecretAccessKey>,
    /// JSON file holding `accessKeyId` and `secretAccessKey`. Takes
    /// precedence over the inline fields.
    pub key_filename: Option<PathBuf>,
    pub endpoint_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: SecretAccessKey,
}

/// Credentials file layout.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsFile {
    access_key_id: String,
    secret_access_key: String,
}

/// Configuration with every default applied. `credentials` stays `None` when
/// nothing was supplied, leaving resolution to the SDK's default chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub output_dir: PathBuf,
    pub region: Region,
    pub credentials: Option<StaticCredentials>,
    pub endpoint_url: Option<String>,
}

impl PollyTtsConfig {
    pub fn resolve(self) -> Result<ResolvedConfig, ConfigError> {
        let output_dir = self.path.unwrap_or_else(std::env::temp_dir);
        let region = match self.region {
            Some(r) => Region::new(r)?,
            None => Region::default(),
        };

        let credentials = match self.key_filename {
            Some(path) => Some(load_credentials_file(&path)?),
            None => match (self.access_key_id, self.secret_access_key) {
                (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                    access_key_id,
                    secret_access_key,
                }),
                (None, None) => None,
                _ => return Err(ConfigError::IncompleteCredentials),
            },
        };

        Ok(ResolvedConfig {
            output_dir,
            region,
            credentials,
            endpoint_url: self.endpoint_url,
        })
    }
}

pub fn load_credentials_file(path: &Path) -> Result<StaticCredentials, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::CredentialsFileNotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path).map_err(|source| ConfigError::CredentialsFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: CredentialsFile =
        serde_json::from_str(&raw).map_err(|source| ConfigError::CredentialsFileMalformed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(StaticCredentials {
        access_key_id: parsed.access_key_id,
        secret_access_key: SecretAccessKey::new(parsed.secret_access_key),
    })
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("region must not be empty")]
    EmptyRegion,
    #[error("accessKeyId and secretAccessKey must be given together")]
    IncompleteCredentials,
    #[error("credentials file not found: {}", .0.display())]
    CredentialsFileNotFound(PathBuf),
    #[error("failed to read credentials file {}: {source}", path.display())]
    CredentialsFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credentials file {} is not well formed: {source}", path.display())]
    CredentialsFileMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// First of the CLI value and the listed environment variables that is set.
pub fn resolve_optional_string(
    cli_value: Option<String>,
    env_keys: &[&str],
    env: &impl Env,
) -> Option<String> {
    cli_value.or_else(|| env_keys.iter().find_map(|key| env.var(key)))
}

pub fn resolve_optional_path(
    cli_value: Option<PathBuf>,
    env_key: &str,
    env: &impl Env,
) -> Option<PathBuf> {
    cli_value.or_else(|| env.var(env_key).map(PathBuf::from))
}
