use log::{error, info};
use std::path::Path;
use tokio::sync::mpsc::Sender;

use crate::models::one_or_many::OneOrMany;
use crate::models::translation::Translation;
use crate::services::google_translate_service::GoogleTranslateService;
use crate::services::http_transport::HttpTransport;
use crate::services::tesseract_service::TextExtractor;

/// Runs OCR on an uploaded image, translates the text and reports every
/// stage as a status message to whoever listens on the channel.
pub struct OcrTranslatePipeline<E, T> {
    sender: Sender<String>,
    extractor: E,
    translate_service: GoogleTranslateService<T>,
    target_language: String,
}

impl<E: TextExtractor, T: HttpTransport> OcrTranslatePipeline<E, T> {
    pub fn new(
        sender: Sender<String>,
        extractor: E,
        translate_service: GoogleTranslateService<T>,
        target_language: String,
    ) -> OcrTranslatePipeline<E, T> {
        OcrTranslatePipeline {
            sender,
            extractor,
            translate_service,
            target_language,
        }
    }

    /// Failing stages are reported on the channel and end the run early, the
    /// returned error only covers a closed channel.
    pub async fn run(&self, image_path: &Path) -> Result<(), anyhow::Error> {
        self.status("Image received...").await?;
        self.status("Starting OCR").await?;

        let text = match self.extractor.extract_text(image_path).await {
            Ok(text) => text,
            Err(err) => {
                error!("OCR of {} failed: {}", image_path.display(), err);
                return self.status(&format!("OCR failed: {}", err)).await;
            }
        };

        self.status("File OCR Done... translating").await?;
        self.status(&format!("OCR Output: {}", text)).await?;

        let translated = match self
            .translate_service
            .translate_to(text, &self.target_language)
            .await
        {
            Ok(translations) => join_translations(translations),
            Err(err) => {
                error!("Translation failed: {}", err);
                return self.status(&format!("Translation failed: {}", err)).await;
            }
        };

        self.status(&format!("Translated Output: {}", translated))
            .await
    }

    async fn status(&self, message: &str) -> Result<(), anyhow::Error> {
        info!("{}", message);
        self.sender.send(message.to_string()).await?;

        Ok(())
    }
}

fn join_translations(translations: OneOrMany<Translation>) -> String {
    translations
        .into_vec()
        .into_iter()
        .map(|translation| translation.translated_text)
        .collect::<Vec<String>>()
        .join("\n")
}
