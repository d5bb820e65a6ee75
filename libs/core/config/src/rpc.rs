use crate::{env_or_default, ConfigError, FromEnv};

/// Message-transport settings for the request/reply RPC surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcConfig {
    /// NATS server URL
    pub url: String,
    /// Prefix prepended to every message pattern, e.g. `products.find_one_product`
    pub subject_prefix: String,
}

impl RpcConfig {
    pub fn new(url: impl Into<String>, subject_prefix: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            subject_prefix: subject_prefix.into(),
        }
    }

    /// Wildcard subject matching every pattern under the prefix.
    pub fn wildcard_subject(&self) -> String {
        format!("{}.*", self.subject_prefix)
    }

    /// Strip the prefix from an incoming subject, yielding the message pattern.
    pub fn pattern_of<'a>(&self, subject: &'a str) -> Option<&'a str> {
        subject
            .strip_prefix(self.subject_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .filter(|pattern| !pattern.is_empty())
    }
}

impl FromEnv for RpcConfig {
    /// - NATS_URL: defaults to nats://127.0.0.1:4222
    /// - RPC_SUBJECT_PREFIX: defaults to "products"
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_or_default("NATS_URL", "nats://127.0.0.1:4222");
        let subject_prefix = env_or_default("RPC_SUBJECT_PREFIX", "products");

        if subject_prefix.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "RPC_SUBJECT_PREFIX".to_string(),
                details: "prefix cannot be empty".to_string(),
            });
        }

        Ok(Self::new(url, subject_prefix))
    }
}
