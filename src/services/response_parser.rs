use log::debug;
use serde::de::DeserializeOwned;

use crate::errors::TranslateError;
use crate::models::google_translate_response::{
    DetectLanguageResponse, LanguagesResponse, TranslateResponse,
};
use crate::models::translation::{Detection, SupportedLanguages, Translation};
use crate::services::http_transport::TransportResponse;

const HTTP_OK: u16 = 200;

pub fn parse_body<T: DeserializeOwned>(resp: TransportResponse) -> Result<T, TranslateError> {
    if resp.status != HTTP_OK {
        return Err(TranslateError::UpstreamStatusError {
            status: resp.status,
        });
    }

    serde_json::from_str::<T>(&resp.body).map_err(|err| {
        debug!("Response body did not match expected shape: {}", err);
        TranslateError::ResponseParseError { body: resp.body }
    })
}

/// Pairs translations with the strings of their batch and decodes HTML
/// entities the API puts into translated text.
pub fn parse_translations(
    originals: &[String],
    resp: TransportResponse,
) -> Result<Vec<Translation>, TranslateError> {
    let response = parse_body::<TranslateResponse>(resp)?;

    let translations = response
        .data
        .into_translations()
        .into_iter()
        .enumerate()
        .map(|(i, mut translation)| {
            if let Some(original) = originals.get(i) {
                translation.original_text = Some(original.clone());
            }
            translation.translated_text =
                html_escape::decode_html_entities(&translation.translated_text).into_owned();
            translation
        })
        .collect();

    Ok(translations)
}

/// Keeps the best candidate per queried string.
pub fn parse_detections(
    originals: &[String],
    resp: TransportResponse,
) -> Result<Vec<Detection>, TranslateError> {
    let response = parse_body::<DetectLanguageResponse>(resp)?;

    let detections = response
        .into_candidates()
        .into_iter()
        .enumerate()
        .filter_map(|(i, candidates)| {
            candidates.into_iter().next().map(|mut detection| {
                if let Some(original) = originals.get(i) {
                    detection.original_text = Some(original.clone());
                }
                detection
            })
        })
        .collect();

    Ok(detections)
}

pub fn parse_languages(resp: TransportResponse) -> Result<SupportedLanguages, TranslateError> {
    let response = parse_body::<LanguagesResponse>(resp)?;

    Ok(SupportedLanguages::from_languages(response.data.languages))
}
