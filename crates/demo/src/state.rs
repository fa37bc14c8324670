//! State shared by every request handler.

use std::sync::Arc;

use accounting_sdk::AsyncAccountingSessionFactory;

use crate::service::TextGenerator;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub accounting: AsyncAccountingSessionFactory,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(accounting: AsyncAccountingSessionFactory, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            accounting,
            generator,
        }
    }
}
