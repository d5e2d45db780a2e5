use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DemoUserConfig {
    pub enabled: bool,
    pub email_domain: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub demo_user: DemoUserConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let demo_user = DemoUserConfig {
            enabled: std::env::var("DEMO_USER")
                .map(|v| v != "0" && v.to_lowercase() != "false")
                .unwrap_or(true),
            email_domain: std::env::var("DEMO_EMAIL_DOMAIN")
                .unwrap_or_else(|_| "headshot.studio".into()),
            display_name: std::env::var("DEMO_USER_NAME").unwrap_or_else(|_| "Demo User".into()),
        };
        Ok(Self {
            database_url,
            demo_user,
        })
    }
}
