//! Runtime context of the storefront (account, render environment).

use product_context_events::RenderEnvironment;

use crate::error::ConfigError;

pub const ACCOUNT_VAR: &str = "STOREFRONT_ACCOUNT";
pub const PAGE_URL_VAR: &str = "STOREFRONT_PAGE_URL";

/// What the storefront runtime tells a product page about where it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    account: String,
    environment: RenderEnvironment,
}

impl RuntimeContext {
    pub fn new(account: impl Into<String>, environment: RenderEnvironment) -> Self {
        Self {
            account: account.into(),
            environment,
        }
    }

    /// Browser render at `page_url`, validated as an absolute URL.
    pub fn browser(account: impl Into<String>, page_url: &str) -> Result<Self, ConfigError> {
        let page_url = url::Url::parse(page_url).map_err(|e| ConfigError::InvalidPageUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(
            account,
            RenderEnvironment::Browser {
                page_url: page_url.to_string(),
            },
        ))
    }

    pub fn server(account: impl Into<String>) -> Self {
        Self::new(account, RenderEnvironment::Server)
    }

    /// Read `STOREFRONT_ACCOUNT` (required) and `STOREFRONT_PAGE_URL`
    /// (optional; absent means a server render).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let account = lookup(ACCOUNT_VAR)
            .filter(|account| !account.is_empty())
            .ok_or(ConfigError::MissingVar(ACCOUNT_VAR))?;

        match lookup(PAGE_URL_VAR).filter(|url| !url.is_empty()) {
            Some(page_url) => Self::browser(account, &page_url),
            None => {
                tracing::info!("{PAGE_URL_VAR} not set; rendering as server (no pixel events)");
                Ok(Self::server(account))
            }
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn environment(&self) -> &RenderEnvironment {
        &self.environment
    }
}
