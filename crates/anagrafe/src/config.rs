use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the delimited data file (default: "data.csv")
    pub csv_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CSV_PATH` - delimited data file path (default: "data.csv")
    pub fn from_env() -> Self {
        Self {
            csv_path: env::var("CSV_PATH").unwrap_or_else(|_| "data.csv".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        env::remove_var("CSV_PATH");

        let config = Config::from_env();

        assert_eq!(config.csv_path, "data.csv");
    }
}
