//! Bundle sources: where translation data for a language comes from.
//!
//! A source is a one-shot asynchronous provider. It either returns the parsed
//! bundle or a [`SourceError`]; it never retries. The store turns every error
//! into a "not found" result.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use super::bundle::TranslationBundle;
use super::language::LanguageCode;

/// Errors a bundle source can report.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no translations available for '{language}'")]
    NotFound { language: LanguageCode },

    #[error("failed to read translations from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed translations for '{language}': {source}")]
    Parse {
        language: LanguageCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation server returned {status} for '{language}'")]
    Status {
        language: LanguageCode,
        status: StatusCode,
    },
}

impl SourceError {
    /// Returns `true` when the source simply has no bundle for the language.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Asynchronous provider of translation bundles.
pub trait BundleSource: Send + Sync {
    /// Fetch and parse the bundle for `language`.
    fn load<'a>(
        &'a self,
        language: &'a LanguageCode,
    ) -> BoxFuture<'a, Result<TranslationBundle, SourceError>>;
}

// ==================== In-memory Source ====================

/// In-memory source of pre-parsed bundles.
///
/// Counts how many times it was asked for a bundle, which makes it useful
/// for asserting cache behaviour.
#[derive(Debug, Default)]
pub struct StaticSource {
    bundles: HashMap<LanguageCode, TranslationBundle>,
    loads: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the bundle for `language`.
    pub fn with_bundle(
        mut self,
        language: impl Into<LanguageCode>,
        bundle: TranslationBundle,
    ) -> Self {
        self.bundles.insert(language.into(), bundle);
        self
    }

    /// Number of `load` calls served so far, successful or not.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl BundleSource for StaticSource {
    fn load<'a>(
        &'a self,
        language: &'a LanguageCode,
    ) -> BoxFuture<'a, Result<TranslationBundle, SourceError>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let result = self
            .bundles
            .get(language)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                language: language.clone(),
            });
        futures::future::ready(result).boxed()
    }
}

// ==================== Filesystem Source ====================

/// Reads `<dir>/<language>.json`.
#[derive(Debug, Clone)]
pub struct FsSource {
    dir: PathBuf,
}

impl FsSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the bundle file for `language`.
    pub fn bundle_path(&self, language: &LanguageCode) -> PathBuf {
        self.dir.join(format!("{}.json", language))
    }
}

impl BundleSource for FsSource {
    fn load<'a>(
        &'a self,
        language: &'a LanguageCode,
    ) -> BoxFuture<'a, Result<TranslationBundle, SourceError>> {
        async move {
            if !language.is_path_safe() {
                return Err(SourceError::NotFound {
                    language: language.clone(),
                });
            }

            let path = self.bundle_path(language);
            debug!("Reading translations for {} from {}", language, path.display());

            let contents = match tokio::fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(SourceError::NotFound {
                        language: language.clone(),
                    })
                }
                Err(source) => return Err(SourceError::Io { path, source }),
            };

            TranslationBundle::from_json_str(&contents).map_err(|source| SourceError::Parse {
                language: language.clone(),
                source,
            })
        }
        .boxed()
    }
}

// ==================== HTTP Source ====================

/// Fetches `<base_url>/<language>.json` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source with its own client and the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a source sharing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL of the bundle for `language`.
    pub fn bundle_url(&self, language: &LanguageCode) -> String {
        format!("{}/{}.json", self.base_url, language)
    }
}

impl BundleSource for HttpSource {
    fn load<'a>(
        &'a self,
        language: &'a LanguageCode,
    ) -> BoxFuture<'a, Result<TranslationBundle, SourceError>> {
        async move {
            // Keep codes from walking out of the base URL
            if !language.is_path_safe() {
                return Err(SourceError::NotFound {
                    language: language.clone(),
                });
            }

            let url = self.bundle_url(language);
            debug!("Fetching translations for {} from {}", language, url);

            let response = self.client.get(&url).send().await?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(SourceError::NotFound {
                    language: language.clone(),
                });
            }
            if !status.is_success() {
                return Err(SourceError::Status {
                    language: language.clone(),
                    status,
                });
            }

            let body = response.text().await?;
            TranslationBundle::from_json_str(&body).map_err(|source| SourceError::Parse {
                language: language.clone(),
                source,
            })
        }
        .boxed()
    }
}
