use std::fmt;

use actix_web::cookie::Key;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ROOMS: [&str; 4] = [
    "Conference Room A",
    "Conference Room B",
    "Board Room",
    "Virtual Meeting Room",
];

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing environment variable {key}"),
            ConfigError::Invalid { key, reason } => write!(f, "Invalid {key}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_upload_preset: String,
    pub session_key: Option<String>,
    pub bind_addr: String,
    pub cookie_secure: bool,
    pub meeting_rooms: Vec<String>,
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `NEXT_PUBLIC_`-prefixed names are
    /// accepted as fallbacks for the API and Cloudinary settings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let with_fallback = |key: &str| get(key).or_else(|| get(&format!("NEXT_PUBLIC_{key}")));

        let api_url = with_fallback("API_URL").ok_or(ConfigError::Missing("API_URL"))?;
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "API_URL",
                reason: format!("'{api_url}' is not an http(s) URL"),
            });
        }

        let cookie_secure = match get("COOKIE_SECURE").as_deref() {
            None => false,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "COOKIE_SECURE",
                    reason: format!("expected true/false, got '{other}'"),
                });
            }
        };

        let meeting_rooms = match get("MEETING_ROOMS") {
            Some(csv) => parse_rooms(&csv),
            None => DEFAULT_ROOMS.iter().map(|r| r.to_string()).collect(),
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            cloudinary_cloud_name: with_fallback("CLOUDINARY_CLOUD_NAME").unwrap_or_default(),
            cloudinary_upload_preset: with_fallback("CLOUDINARY_UPLOAD_PRESET").unwrap_or_default(),
            session_key: get("SESSION_KEY"),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            cookie_secure,
            meeting_rooms,
        })
    }

    /// Session encryption key. Falls back to a random key (sessions are lost on
    /// restart) when SESSION_KEY is unset or shorter than 64 bytes.
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need 64+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }

    pub fn uploads_enabled(&self) -> bool {
        !self.cloudinary_cloud_name.is_empty() && !self.cloudinary_upload_preset.is_empty()
    }
}

fn parse_rooms(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
