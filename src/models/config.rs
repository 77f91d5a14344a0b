use anyhow::{anyhow, Error};
use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::services::google_translate_service::{
    BASE_URL, DEFAULT_CONCURRENT_LIMIT, DEFAULT_TIMEOUT_SECONDS,
};

pub const CONFIG_FILE: &str = "config.json";
pub const ENV_PREFIX: &str = "OCR_TRANSLATE_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub translate_api_key: String,
    pub concurrent_limit: usize,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub target_language: String,
    pub tesseract_binary: String,
    pub ocr_language: String,
    pub ocr_psm: u8,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            translate_api_key: String::new(),
            concurrent_limit: DEFAULT_CONCURRENT_LIMIT,
            api_base_url: BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECONDS,
            target_language: "en".to_string(),
            tesseract_binary: "/usr/local/bin/tesseract".to_string(),
            ocr_language: "deu".to_string(),
            ocr_psm: 6,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `config.json` and then `OCR_TRANSLATE_*`
    /// environment variables.
    pub fn load() -> Result<Config, Error> {
        Config::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Json::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Config, Error> {
        let config: Config = figment.extract()?;

        if config.translate_api_key.trim().is_empty() {
            return Err(anyhow!(
                "translate_api_key is not set, use {} or {}TRANSLATE_API_KEY",
                CONFIG_FILE,
                ENV_PREFIX
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    #[test]
    fn json_overrides_defaults() {
        let config = Config::from_figment(defaults().merge(Json::string(
            r#"{ "translate_api_key": "abc", "concurrent_limit": 4, "ocr_language": "fra" }"#,
        )))
        .unwrap();

        assert_eq!(config.translate_api_key, "abc");
        assert_eq!(config.concurrent_limit, 4);
        assert_eq!(config.ocr_language, "fra");
        assert_eq!(config.target_language, "en");
        assert_eq!(config.ocr_psm, 6);
        assert_eq!(config.api_base_url, BASE_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let result = Config::from_figment(defaults());
        assert!(result.is_err());
    }
}
