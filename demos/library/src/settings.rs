use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use formbit::info;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    pub api_host: String,
}

impl LibraryConfig {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        dotenv().ok();
        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("LIBRARY").try_parsing(true).separator("__"))
            .set_default("api_host", "http://localhost:8080")?;
        let config = builder.build()?.try_deserialize::<LibraryConfig>()?;
        info!("{:#?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_the_default_host() {
        let config = LibraryConfig::new("no-such-file").unwrap();
        assert_eq!(config.api_host, "http://localhost:8080");
    }
}
