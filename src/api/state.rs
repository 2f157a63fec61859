//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono_tz::Tz;
use tokio::sync::RwLock;

use crate::config::{ConfigLoader, PayrollDataset, PayrollRules, ServiceSettings};

/// Shared application state.
///
/// The dataset sits behind a read/write lock: calculations take the read
/// side, adding and deleting shifts take the write side.
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<RwLock<PayrollDataset>>,
    rules: Arc<PayrollRules>,
    api_token: Arc<str>,
    timezone: Tz,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        dataset: PayrollDataset,
        rules: PayrollRules,
        api_token: impl Into<String>,
        timezone: Tz,
    ) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            rules: Arc::new(rules),
            api_token: Arc::from(api_token.into()),
            timezone,
        }
    }

    /// Creates the state from a loaded data directory and the service
    /// settings.
    pub fn from_config(loader: ConfigLoader, settings: &ServiceSettings) -> Self {
        let (dataset, rules) = loader.into_parts();
        Self::new(dataset, rules, settings.api_token.clone(), settings.timezone)
    }

    /// Returns the shared dataset.
    pub fn dataset(&self) -> &RwLock<PayrollDataset> {
        &self.dataset
    }

    /// Returns the payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Returns the expected bearer token.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Returns the zone used for response timestamps.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}
