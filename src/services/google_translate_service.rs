use futures::future::Future;
use futures::stream::{self, StreamExt, TryStreamExt};
use log::debug;
use std::time::Duration;
use url::Url;

use crate::errors::TranslateError;
use crate::models::config::Config;
use crate::models::one_or_many::{OneOrMany, TextInput};
use crate::models::translation::{Detection, SupportedLanguages, Translation};
use crate::services::http_transport::{HttpTransport, ReqwestTransport};
use crate::services::response_parser::{parse_detections, parse_languages, parse_translations};
use crate::utils::batch_utils::{split_for_query, MAX_GET_QUERY_LEN};

pub const BASE_URL: &str = "https://www.googleapis.com/language/translate/v2/";
pub const DEFAULT_CONCURRENT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Client for the Google Translate v2 REST API.
///
/// Inputs too long for a single GET query are split into batches which are
/// requested concurrently, at most `concurrent_limit` at a time, and merged
/// back in input order.
pub struct GoogleTranslateService<T = ReqwestTransport> {
    api_key: String,
    concurrent_limit: usize,
    base_url: String,
    transport: T,
}

impl GoogleTranslateService<ReqwestTransport> {
    pub fn new(
        api_key: String,
        concurrent_limit: Option<usize>,
    ) -> Result<GoogleTranslateService<ReqwestTransport>, anyhow::Error> {
        let transport = ReqwestTransport::new(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))?;

        Ok(GoogleTranslateService::with_transport(
            api_key,
            concurrent_limit,
            transport,
        ))
    }

    pub fn from_config(
        config: &Config,
    ) -> Result<GoogleTranslateService<ReqwestTransport>, anyhow::Error> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.request_timeout_secs))?;

        let service = GoogleTranslateService::with_transport(
            config.translate_api_key.clone(),
            Some(config.concurrent_limit),
            transport,
        )
        .with_base_url(&config.api_base_url)?;

        Ok(service)
    }
}

impl<T: HttpTransport> GoogleTranslateService<T> {
    pub fn with_transport(
        api_key: String,
        concurrent_limit: Option<usize>,
        transport: T,
    ) -> GoogleTranslateService<T> {
        let concurrent_limit = match concurrent_limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_CONCURRENT_LIMIT,
        };

        GoogleTranslateService {
            api_key,
            concurrent_limit,
            base_url: BASE_URL.to_string(),
            transport,
        }
    }

    /// Points the client at another endpoint. Relative paths such as
    /// `detect` are resolved against it, so it should end with a slash.
    pub fn with_base_url(
        mut self,
        base_url: &str,
    ) -> Result<GoogleTranslateService<T>, url::ParseError> {
        Url::parse(base_url)?;
        self.base_url = base_url.to_string();
        Ok(self)
    }

    pub fn concurrent_limit(&self) -> usize {
        self.concurrent_limit
    }

    /// Translates into `target`. Without a `source` the API detects the
    /// input language.
    pub async fn translate<I: Into<TextInput>>(
        &self,
        input: I,
        source: Option<&str>,
        target: &str,
    ) -> Result<OneOrMany<Translation>, TranslateError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(TranslateError::MissingTarget);
        }

        let items = non_empty_items(input.into())?;
        let source = source.map(str::trim).filter(|s| !s.is_empty());

        let batches = split_for_query(&items, MAX_GET_QUERY_LEN);
        debug!(
            "Translating {} strings to {} in {} batches",
            items.len(),
            target,
            batches.len()
        );

        let translations = self
            .map_batches(batches, |batch| self.translate_batch(batch, source, target))
            .await?;

        Ok(OneOrMany::from_vec(translations))
    }

    pub async fn translate_to<I: Into<TextInput>>(
        &self,
        input: I,
        target: &str,
    ) -> Result<OneOrMany<Translation>, TranslateError> {
        self.translate(input, None, target).await
    }

    pub async fn detect_language<I: Into<TextInput>>(
        &self,
        input: I,
    ) -> Result<OneOrMany<Detection>, TranslateError> {
        let items = non_empty_items(input.into())?;

        let batches = split_for_query(&items, MAX_GET_QUERY_LEN);
        debug!(
            "Detecting language of {} strings in {} batches",
            items.len(),
            batches.len()
        );

        let detections = self
            .map_batches(batches, |batch| self.detect_batch(batch))
            .await?;

        Ok(OneOrMany::from_vec(detections))
    }

    /// Lists the languages the API supports. With a `target` the entries
    /// carry display names in that language, otherwise only codes.
    pub async fn get_supported_languages(
        &self,
        target: Option<&str>,
    ) -> Result<SupportedLanguages, TranslateError> {
        let mut params = vec![];
        if let Some(target) = target.map(str::trim).filter(|t| !t.is_empty()) {
            params.push(("target", target));
        }

        let url = self.build_url("languages", &[], &params)?;
        let resp = self.transport.get(url.as_str()).await?;

        parse_languages(resp)
    }

    async fn translate_batch(
        &self,
        batch: Vec<String>,
        source: Option<&str>,
        target: &str,
    ) -> Result<Vec<Translation>, TranslateError> {
        let mut params = vec![("target", target)];
        if let Some(source) = source {
            params.push(("source", source));
        }

        let url = self.build_url("", &batch, &params)?;
        let resp = self.transport.get(url.as_str()).await?;

        parse_translations(&batch, resp)
    }

    async fn detect_batch(&self, batch: Vec<String>) -> Result<Vec<Detection>, TranslateError> {
        let url = self.build_url("detect", &batch, &[])?;
        let resp = self.transport.get(url.as_str()).await?;

        parse_detections(&batch, resp)
    }

    /// Runs `call` for every batch with bounded concurrency. The first
    /// failing batch fails the whole operation.
    async fn map_batches<R, F, Fut>(
        &self,
        batches: Vec<Vec<String>>,
        call: F,
    ) -> Result<Vec<R>, TranslateError>
    where
        F: Fn(Vec<String>) -> Fut,
        Fut: Future<Output = Result<Vec<R>, TranslateError>>,
    {
        let mut results: Vec<(usize, Vec<R>)> = stream::iter(batches.into_iter().enumerate())
            .map(|(index, batch)| {
                let request = call(batch);
                async move { request.await.map(|result| (index, result)) }
            })
            .buffer_unordered(self.concurrent_limit)
            .try_collect()
            .await?;

        results.sort_by_key(|(index, _)| *index);

        Ok(results
            .into_iter()
            .flat_map(|(_, result)| result)
            .collect())
    }

    fn build_url(
        &self,
        path: &str,
        queries: &[String],
        params: &[(&str, &str)],
    ) -> Result<Url, TranslateError> {
        let mut url = Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| TranslateError::InvalidEndpoint(format!("{}: {}", path, err)))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for query in queries {
                pairs.append_pair("q", query);
            }
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}

fn non_empty_items(input: TextInput) -> Result<Vec<String>, TranslateError> {
    let items = input.into_items();
    if items.is_empty() {
        return Err(TranslateError::InvalidInput(
            "input must contain at least one string".to_string(),
        ));
    }

    Ok(items)
}
