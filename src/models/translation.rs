use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_source_language: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reliable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Languages reported by the API. Requests without a display target only
/// carry codes, so those are returned as plain strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SupportedLanguages {
    Codes(Vec<String>),
    Named(Vec<Language>),
}

impl SupportedLanguages {
    pub fn from_languages(languages: Vec<Language>) -> SupportedLanguages {
        let has_names = languages
            .first()
            .map(|language| language.name.is_some())
            .unwrap_or(false);

        if has_names {
            SupportedLanguages::Named(languages)
        } else {
            SupportedLanguages::Codes(languages.into_iter().map(|l| l.language).collect())
        }
    }

    pub fn codes(&self) -> Vec<&str> {
        match self {
            SupportedLanguages::Codes(codes) => codes.iter().map(String::as_str).collect(),
            SupportedLanguages::Named(languages) => {
                languages.iter().map(|l| l.language.as_str()).collect()
            }
        }
    }
}
