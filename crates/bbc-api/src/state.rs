//! # Application State
//!
//! Shared state passed to all route handlers via the `State` extractor.
//! Stores live inside the [`Moderator`]; no lock is held across an
//! `.await`.

use std::sync::Arc;

use bbc_moderation::{LogNotifier, Moderator};

use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub moderator: Moderator,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// In-memory stores and a logging notifier addressed to the configured
    /// approval email.
    pub fn new(config: AppConfig) -> Self {
        let notifier = Arc::new(LogNotifier::new(config.approval_email.clone()));
        let moderator =
            Moderator::in_memory(config.public_base_url.clone()).with_notifier(notifier);
        Self::with_moderator(config, moderator)
    }

    pub fn with_moderator(config: AppConfig, moderator: Moderator) -> Self {
        Self {
            moderator,
            config: Arc::new(config),
        }
    }
}
