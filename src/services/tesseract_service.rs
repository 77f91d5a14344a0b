use async_trait::async_trait;
use log::debug;
use std::path::Path;
use tokio::process::Command;

use crate::errors::OcrError;
use crate::models::config::Config;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, image_path: &Path) -> Result<String, OcrError>;
}

pub struct TesseractService {
    binary: String,
    language: String,
    psm: u8,
}

impl TesseractService {
    pub fn new(binary: String, language: String, psm: u8) -> TesseractService {
        TesseractService {
            binary,
            language,
            psm,
        }
    }

    pub fn from_config(config: &Config) -> TesseractService {
        TesseractService::new(
            config.tesseract_binary.clone(),
            config.ocr_language.clone(),
            config.ocr_psm,
        )
    }

    pub async fn process(&self, image_path: &Path) -> Result<String, OcrError> {
        let args = self.build_args(image_path);
        debug!("Running {} {:?}", self.binary, args);

        let output = Command::new(&self.binary).args(&args).output().await?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|_| OcrError::InvalidOutput)?;

        Ok(text.trim().to_string())
    }

    fn build_args(&self, image_path: &Path) -> Vec<String> {
        vec![
            image_path.to_string_lossy().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.language.clone(),
            "--psm".to_string(),
            self.psm.to_string(),
        ]
    }
}

#[async_trait]
impl TextExtractor for TesseractService {
    async fn extract_text(&self, image_path: &Path) -> Result<String, OcrError> {
        self.process(image_path).await
    }
}
