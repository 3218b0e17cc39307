//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountRegistration, LoginService, NotebookCommand, NotebookQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn AccountRegistration>,
    pub notebook: Arc<dyn NotebookQuery>,
    pub notebook_command: Arc<dyn NotebookCommand>,
}

impl HttpState {
    /// Bundle the use-case ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use notebook::domain::{AccountService, NotebookService};
    /// use notebook::inbound::http::state::HttpState;
    /// use notebook::outbound::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let accounts = Arc::new(AccountService::new(store.clone()));
    /// let notebook = Arc::new(NotebookService::new(
    ///     store.clone(),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(accounts.clone(), accounts, notebook.clone(), notebook);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn AccountRegistration>,
        notebook: Arc<dyn NotebookQuery>,
        notebook_command: Arc<dyn NotebookCommand>,
    ) -> Self {
        Self {
            login,
            registration,
            notebook,
            notebook_command,
        }
    }
}
