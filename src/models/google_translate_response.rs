use serde::Deserialize;

use super::translation::{Detection, Language, Translation};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslateResponse {
    pub data: TranslationsData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TranslationsData {
    Named { translations: Vec<Translation> },
    Bare(Vec<Translation>),
}

impl TranslationsData {
    pub fn into_translations(self) -> Vec<Translation> {
        match self {
            TranslationsData::Named { translations } => translations,
            TranslationsData::Bare(translations) => translations,
        }
    }
}

/// One candidate list per queried string, best candidate first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DetectLanguageResponse {
    Wrapped { data: DetectionsData },
    Bare(Vec<Vec<Detection>>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectionsData {
    pub detections: Vec<Vec<Detection>>,
}

impl DetectLanguageResponse {
    pub fn into_candidates(self) -> Vec<Vec<Detection>> {
        match self {
            DetectLanguageResponse::Wrapped { data } => data.detections,
            DetectLanguageResponse::Bare(detections) => detections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguagesResponse {
    pub data: LanguagesData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguagesData {
    pub languages: Vec<Language>,
}
