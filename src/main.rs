use clap::Parser;
use log::{error, info, LevelFilter};
use ocr_translate::{
    models::config::Config,
    pipeline::ocr_translate_pipeline::OcrTranslatePipeline,
    services::{
        google_translate_service::GoogleTranslateService, tesseract_service::TesseractService,
    },
};
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::task;

/// Extract text from an image with tesseract and translate it
#[derive(Parser, Debug)]
#[command(name = "ocr-translate", version)]
struct Args {
    /// Image to run OCR on
    image: PathBuf,

    /// Target language, overrides the configured one
    #[arg(short, long)]
    target: Option<String>,
}

#[tokio::main]
pub async fn main() -> Result<(), anyhow::Error> {
    let Args { image, target } = Args::parse();
    let config = Config::load()?;

    let level = LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::Info);
    SimpleLogger::new().with_level(level).init()?;

    let target_language = target.unwrap_or_else(|| config.target_language.clone());
    let translate_service = GoogleTranslateService::from_config(&config)?;
    let tesseract_service = TesseractService::from_config(&config);

    info!(
        "Translating {} to {} with up to {} concurrent requests",
        image.display(),
        target_language,
        translate_service.concurrent_limit()
    );

    let (tx, mut rx): (Sender<String>, Receiver<String>) = channel(32);

    let pipeline_task = task::spawn(async move {
        let pipeline =
            OcrTranslatePipeline::new(tx, tesseract_service, translate_service, target_language);

        if let Err(err) = pipeline.run(&image).await {
            error!("Pipeline stopped: {}", err);
        }
    });

    let status_task = task::spawn(async move {
        while let Some(status) = rx.recv().await {
            println!("status: {}", status);
        }
    });

    pipeline_task.await?;
    status_task.await?;

    Ok(())
}
