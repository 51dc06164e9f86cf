use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::i18n::{BundleSource, FsSource, HttpSource, I18nOptions, LanguageCode};

/// Where translation bundles are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// `<url>/<language>.json` over HTTP
    Http { base_url: String, timeout: Duration },
    /// `<dir>/<language>.json` on disk
    Dir(PathBuf),
}

impl SourceConfig {
    /// Interpret `value` as a base URL if it has an http(s) scheme, else a directory.
    pub fn parse(value: &str, timeout: Duration) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            bail!("I18N_SOURCE is empty");
        }
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::Http {
                base_url: value.to_string(),
                timeout,
            })
        } else {
            Ok(Self::Dir(PathBuf::from(value)))
        }
    }

    pub fn build_source(&self) -> Result<Arc<dyn BundleSource>> {
        Ok(match self {
            Self::Http { base_url, timeout } => Arc::new(
                HttpSource::new(base_url.clone(), *timeout)
                    .context("Failed to build HTTP translation source")?,
            ),
            Self::Dir(dir) => Arc::new(FsSource::new(dir.clone())),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Languages
    pub current_language: LanguageCode,
    pub fallback_language: Option<LanguageCode>,

    // Bundle source
    pub source: SourceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let timeout_secs: u64 = std::env::var("I18N_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let source = std::env::var("I18N_SOURCE").context("I18N_SOURCE not set")?;

        Ok(Self {
            current_language: std::env::var("I18N_CURRENT_LANGUAGE")
                .ok()
                .map(LanguageCode::new)
                .filter(|l| !l.is_empty())
                .unwrap_or_default(),
            fallback_language: std::env::var("I18N_FALLBACK_LANGUAGE")
                .ok()
                .map(LanguageCode::new)
                .filter(|l| !l.is_empty()),

            source: SourceConfig::parse(&source, Duration::from_secs(timeout_secs))?,
        })
    }

    pub fn i18n_options(&self) -> I18nOptions {
        I18nOptions {
            current_language: self.current_language.clone(),
            fallback_language: self.fallback_language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "I18N_CURRENT_LANGUAGE",
        "I18N_FALLBACK_LANGUAGE",
        "I18N_SOURCE",
        "I18N_HTTP_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    // ==================== SourceConfig Tests ====================

    #[test]
    fn test_source_parse_http() {
        let source = SourceConfig::parse("https://cdn.example.com/i18n", Duration::from_secs(3))
            .expect("valid source");
        assert_eq!(
            source,
            SourceConfig::Http {
                base_url: "https://cdn.example.com/i18n".to_string(),
                timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn test_source_parse_dir() {
        let source = SourceConfig::parse(" ./locales ", Duration::from_secs(3)).expect("valid source");
        assert_eq!(source, SourceConfig::Dir(PathBuf::from("./locales")));
    }

    #[test]
    fn test_source_parse_empty_fails() {
        assert!(SourceConfig::parse("   ", Duration::from_secs(3)).is_err());
    }

    #[test]
    fn test_build_source() {
        let dir = SourceConfig::Dir(PathBuf::from("locales"));
        assert!(dir.build_source().is_ok());

        let http = SourceConfig::Http {
            base_url: "http://localhost:1234".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert!(http.build_source().is_ok());
    }

    // ==================== from_env Tests ====================

    #[test]
    #[serial]
    fn test_from_env_requires_source() {
        clear_env();
        let err = Config::from_env().expect_err("missing source should fail");
        assert!(err.to_string().contains("I18N_SOURCE not set"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("I18N_SOURCE", "locales");

        let config = Config::from_env().expect("valid config");
        assert_eq!(config.current_language.as_str(), "en-US");
        assert_eq!(config.fallback_language, None);
        assert_eq!(config.source, SourceConfig::Dir(PathBuf::from("locales")));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_full() {
        clear_env();
        std::env::set_var("I18N_SOURCE", "https://cdn.example.com/i18n");
        std::env::set_var("I18N_CURRENT_LANGUAGE", "es-ES");
        std::env::set_var("I18N_FALLBACK_LANGUAGE", "en-US");
        std::env::set_var("I18N_HTTP_TIMEOUT_SECS", "2");

        let config = Config::from_env().expect("valid config");
        assert_eq!(
            config.i18n_options(),
            I18nOptions::new("es-ES").with_fallback("en-US")
        );
        assert_eq!(
            config.source,
            SourceConfig::Http {
                base_url: "https://cdn.example.com/i18n".to_string(),
                timeout: Duration::from_secs(2),
            }
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout_uses_default() {
        clear_env();
        std::env::set_var("I18N_SOURCE", "http://localhost");
        std::env::set_var("I18N_HTTP_TIMEOUT_SECS", "soon");

        let config = Config::from_env().expect("valid config");
        assert!(matches!(
            config.source,
            SourceConfig::Http { timeout, .. } if timeout == Duration::from_secs(10)
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_blank_fallback_is_none() {
        clear_env();
        std::env::set_var("I18N_SOURCE", "locales");
        std::env::set_var("I18N_FALLBACK_LANGUAGE", "  ");

        let config = Config::from_env().expect("valid config");
        assert_eq!(config.fallback_language, None);
        clear_env();
    }
}
