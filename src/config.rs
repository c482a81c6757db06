use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    MongoDb,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub storage: StorageKind,
    pub mongodb_uri: String,
    pub mongodb_db: String,

    // where the views send their REST calls
    pub api_base_url: String,
    pub templates_dir: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8080);

    let storage = match env::var("STORAGE").as_deref().map(str::trim) {
        Ok(s) if s.eq_ignore_ascii_case("mongodb") || s.eq_ignore_ascii_case("mongo") => {
            StorageKind::MongoDb
        }
        _ => StorageKind::Memory,
    };

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB").unwrap_or_else(|_| "retirement".to_string());

    let api_base_url = env::var("API_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("http://{host}:{port}"));

    let templates_dir = env::var("TEMPLATES_DIR").unwrap_or_else(|_| "templates".to_string());

    Settings {
        host,
        port,
        storage,
        mongodb_uri,
        mongodb_db,
        api_base_url,
        templates_dir,
    }
}
