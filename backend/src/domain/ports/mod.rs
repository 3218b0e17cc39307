//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod credential_resolver;
mod login_service;
mod note_repository;
mod notebook;
mod registration;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use credential_resolver::MockCredentialResolver;
pub use credential_resolver::CredentialResolver;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NoteRepository, NoteRepositoryError};
#[cfg(test)]
pub use notebook::{MockNotebookCommand, MockNotebookQuery};
pub use notebook::{NotebookCommand, NotebookQuery};
#[cfg(test)]
pub use registration::MockAccountRegistration;
pub use registration::AccountRegistration;
