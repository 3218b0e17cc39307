//! Storage selection and wiring of domain services into HTTP state.
//!
//! The same services run over either the Diesel repositories or the shared
//! in-memory store; [`Storage`] hides which one is active from the rest of
//! the server.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{AccountRepository, NoteRepository};
use crate::domain::{
    AccountService, DemoDataError, DemoDataOutcome, DemoDataSeeder, NotebookService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::{DbPool, DieselAccountRepository, DieselNoteRepository};

/// Repository backend shared by every worker.
#[derive(Clone)]
pub enum Storage {
    /// Process-local store; data is lost on restart.
    Memory(Arc<MemoryStore>),
    /// PostgreSQL through the Diesel adapters.
    Postgres {
        accounts: Arc<DieselAccountRepository>,
        notes: Arc<DieselNoteRepository>,
    },
}

impl Storage {
    /// Fresh in-memory storage.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::new()))
    }

    /// Diesel repositories over `pool`.
    #[must_use]
    pub fn postgres(pool: &DbPool) -> Self {
        Self::Postgres {
            accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
            notes: Arc::new(DieselNoteRepository::new(pool.clone())),
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }

    /// Build handler state over this storage.
    #[must_use]
    pub fn http_state(&self, clock: Arc<dyn Clock>) -> HttpState {
        match self {
            Self::Memory(store) => wire(store.clone(), store.clone(), clock),
            Self::Postgres { accounts, notes } => wire(accounts.clone(), notes.clone(), clock),
        }
    }

    /// Create any missing demo accounts and their notes.
    pub async fn ensure_demo_data(
        &self,
        clock: Arc<dyn Clock>,
    ) -> Result<DemoDataOutcome, DemoDataError> {
        match self {
            Self::Memory(store) => {
                DemoDataSeeder::new(store.clone(), store.clone(), clock)
                    .ensure()
                    .await
            }
            Self::Postgres { accounts, notes } => {
                DemoDataSeeder::new(accounts.clone(), notes.clone(), clock)
                    .ensure()
                    .await
            }
        }
    }
}

fn wire<A, N>(accounts: Arc<A>, notes: Arc<N>, clock: Arc<dyn Clock>) -> HttpState
where
    A: AccountRepository + 'static,
    N: NoteRepository + 'static,
{
    let account_service = Arc::new(AccountService::new(accounts.clone()));
    let notebook_service = Arc::new(NotebookService::new(accounts, notes, clock));
    HttpState::new(
        account_service.clone(),
        account_service,
        notebook_service.clone(),
        notebook_service,
    )
}
