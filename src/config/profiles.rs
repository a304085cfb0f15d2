use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Staging,
    Production,
}

impl Profile {
    pub fn from_env() -> Self {
        std::env::var("APP_PROFILE")
            .ok()
            .and_then(|s| Self::parse(&s))
            .unwrap_or(Self::Development)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "staging" | "stage" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProfileDefaults {
    pub server_port: u16,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub cors_allowed_origins: Option<String>,
    pub session_ttl_secs: u64,
    pub session_cookie_secure: bool,
}

impl ProfileDefaults {
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Development => Self {
                server_port: 8000,
                database_url: None,
                db_max_connections: 5,
                cors_allowed_origins: Some("http://localhost:3000".to_string()),
                session_ttl_secs: 3600,
                session_cookie_secure: false,
            },
            Profile::Staging => Self {
                server_port: 8080,
                database_url: None,
                db_max_connections: 10,
                cors_allowed_origins: Some("https://staging.washbay.example.com".to_string()),
                session_ttl_secs: 3600,
                session_cookie_secure: true,
            },
            Profile::Production => Self {
                server_port: 8080,
                database_url: None,
                db_max_connections: 20,
                cors_allowed_origins: Some("https://washbay.example.com".to_string()),
                session_ttl_secs: 3600,
                session_cookie_secure: true,
            },
        }
    }
}
