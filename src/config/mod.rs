use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub form_token_expiration_secs: u64,
    pub form_token_sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let form_token_expiration = env::var("FORM_TOKEN_EXPIRATION")?
            .trim_end_matches('h')
            .parse::<u64>()
            .unwrap_or(1);
        Ok(Config {
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")?.parse().unwrap_or(3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".to_string()),
            form_token_expiration_secs: form_token_expiration * 3600,
            form_token_sweep_interval_secs: env::var("FORM_TOKEN_SWEEP_INTERVAL")?
                .parse()
                .unwrap_or(3600),
        })
    }

    pub fn form_token_expiration(&self) -> Duration {
        Duration::from_secs(self.form_token_expiration_secs)
    }

    pub fn form_token_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.form_token_sweep_interval_secs)
    }
}
