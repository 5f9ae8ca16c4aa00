use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Trailing lookback window for notification generation, in days
    /// (default: 30)
    pub window_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            window_days: std::env::var("NOTIFICATION_WINDOW_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { window_days: 30 }
    }
}
