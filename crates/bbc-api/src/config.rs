//! # Service Configuration
//!
//! Layered: built-in defaults, then an optional YAML or JSON file, then
//! environment variables. The file is named by `CONFIG_FILE`; without it,
//! `./config.json` is read when present.
//!
//! | Setting              | Env / file key        | Default                     |
//! |----------------------|-----------------------|-----------------------------|
//! | `port`               | `PORT`                | `5000`                      |
//! | `admin.user`         | `ADMIN_USER`          | required                    |
//! | `admin.password`     | `ADMIN_PASSWORD`      | required                    |
//! | `approval_email`     | `APPROVAL_EMAIL`      | none                        |
//! | `public_base_url`    | `PUBLIC_BASE_URL`     | `http://localhost:{port}`   |
//! | `submission_origins` | `SUBMISSION_ORIGINS`  | the connector site origins  |

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::auth::AdminCredentials;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CONFIG_FILE: &str = "./config.json";

/// Origins allowed to submit from a browser.
pub const DEFAULT_SUBMISSION_ORIGINS: [&str; 3] = [
    "http://localhost:8000",
    "http://bluebuttonconnector.healthit.gov",
    "https://bluebuttonconnector.healthit.gov",
];

/// Errors while assembling [`AppConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ADMIN_USER and ADMIN_PASSWORD must both be configured")]
    MissingCredentials,

    #[error("invalid port {0:?}")]
    InvalidPort(String),

    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Runtime configuration of the HTTP service.
///
/// Custom `Debug` redacts the admin password.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub admin: AdminCredentials,
    /// Where moderation notices are addressed.
    pub approval_email: Option<String>,
    /// Base of links placed in moderation notices.
    pub public_base_url: String,
    pub submission_origins: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("admin", &self.admin)
            .field("approval_email", &self.approval_email)
            .field("public_base_url", &self.public_base_url)
            .field("submission_origins", &self.submission_origins)
            .finish()
    }
}

impl AppConfig {
    /// Configuration with defaults and the given admin credentials.
    pub fn new(admin: AdminCredentials) -> Self {
        Self {
            port: DEFAULT_PORT,
            admin,
            approval_email: None,
            public_base_url: format!("http://localhost:{DEFAULT_PORT}"),
            submission_origins: DEFAULT_SUBMISSION_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load from the process environment and the configured file.
    pub fn load() -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();
        let file = match env("CONFIG_FILE") {
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };
        Self::from_sources(file.as_deref(), env)
    }

    /// Load from an optional file and an environment lookup. Environment
    /// values win over file values.
    pub fn from_sources(
        file: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match file {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        let setting = |key: &str, from_file: Option<String>| {
            env(key).filter(|v| !v.trim().is_empty()).or(from_file)
        };

        let port = match setting("PORT", file.port.map(Setting::into_text)) {
            Some(text) => text
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(text))?,
            None => DEFAULT_PORT,
        };

        let user = setting("ADMIN_USER", file.admin_user.map(Setting::into_text));
        let password = setting("ADMIN_PASSWORD", file.admin_password.map(Setting::into_text));
        let admin = match (user, password) {
            (Some(user), Some(password)) => AdminCredentials::new(user, password),
            _ => return Err(ConfigError::MissingCredentials),
        };

        let approval_email = setting("APPROVAL_EMAIL", file.approval_email);
        let public_base_url = setting("PUBLIC_BASE_URL", file.public_base_url)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let submission_origins = match env("SUBMISSION_ORIGINS") {
            Some(list) => split_list(&list),
            None => match file.submission_origins {
                Some(OneOrMany::Many(list)) => list,
                Some(OneOrMany::One(list)) => split_list(&list),
                None => DEFAULT_SUBMISSION_ORIGINS.iter().map(|s| s.to_string()).collect(),
            },
        };

        Ok(Self {
            port,
            admin,
            approval_email,
            public_base_url,
            submission_origins,
        })
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// On-disk settings. Keys are accepted in either snake case or the
/// upper-case environment spelling.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default, alias = "PORT")]
    port: Option<Setting>,
    #[serde(default, alias = "ADMIN_USER")]
    admin_user: Option<Setting>,
    #[serde(default, alias = "ADMIN_PASSWORD")]
    admin_password: Option<Setting>,
    #[serde(default, alias = "APPROVAL_EMAIL")]
    approval_email: Option<String>,
    #[serde(default, alias = "PUBLIC_BASE_URL")]
    public_base_url: Option<String>,
    #[serde(default, alias = "SUBMISSION_ORIGINS")]
    submission_origins: Option<OneOrMany>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A scalar that may be written as a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Setting {
    Number(i64),
    Text(String),
}

impl Setting {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<String>),
    One(String),
}
