use std::path::PathBuf;

/// Server configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub default_user_id: String,
    pub static_dir: PathBuf,
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:aventuras.db".to_string());

        let default_user_id = std::env::var("DEFAULT_USER_ID")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "couple".to_string());

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        // In development the client runs from its own dev server, so the
        // backend answers API routes only.
        let dev_mode = std::env::var("APP_ENV")
            .map(|value| value == "development")
            .unwrap_or(false);

        Self {
            port,
            database_url,
            default_user_id,
            static_dir,
            dev_mode,
        }
    }
}
