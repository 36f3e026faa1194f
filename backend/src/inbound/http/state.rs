//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ItemsCommand, ItemsQuery, LoginService, SignupService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub items_query: Arc<dyn ItemsQuery>,
    pub items_command: Arc<dyn ItemsCommand>,
}

impl HttpState {
    /// Construct state from the account and item ports.
    ///
    /// # Examples
    /// ```ignore
    /// let state = HttpState::new(accounts.clone(), accounts, items.clone(), items);
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        signup: Arc<dyn SignupService>,
        items_query: Arc<dyn ItemsQuery>,
        items_command: Arc<dyn ItemsCommand>,
    ) -> Self {
        Self {
            login,
            signup,
            items_query,
            items_command,
        }
    }
}
