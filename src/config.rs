use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_hours: i64,
}

/// Authorization policy knobs. The original deployment left both behaviors
/// implicit; they are explicit and configurable here.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// When true, only the recipient of a swap request may change its status.
    pub swap_recipient_only: bool,
    /// When true, banned users are refused at login. Outstanding tokens stay
    /// valid until expiry.
    pub enforce_ban: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub uploads_dir: PathBuf,
    pub jwt: JwtConfig,
    pub policy: PolicyConfig,
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_file = std::env::var("DATA_FILE")
            .unwrap_or_else(|_| "data.json".into())
            .into();
        let uploads_dir = std::env::var("UPLOADS_DIR")
            .unwrap_or_else(|_| "uploads".into())
            .into();
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "skillswap".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "skillswap-users".into()),
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        let policy = PolicyConfig {
            swap_recipient_only: env_flag("SWAP_RECIPIENT_ONLY", false),
            enforce_ban: env_flag("ENFORCE_BAN", true),
        };
        Ok(Self {
            data_file,
            uploads_dir,
            jwt,
            policy,
        })
    }
}
