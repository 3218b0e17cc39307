//! Domain model, use-case services, and ports.
//!
//! Purpose: hold the notebook's business rules free of HTTP and SQL. Accounts
//! own notes through a single owner id; every notebook operation is scoped to
//! the acting user's account.
//!
//! Public surface:
//! - [`Account`], [`Username`], [`AccountId`]: registered users.
//! - [`Note`], [`NoteId`], [`NoteDraft`]: owned notes.
//! - [`Credentials`], [`Principal`], [`Authority`]: authentication values.
//! - [`AccountService`], [`NotebookService`], [`DemoDataSeeder`]: use-cases.
//! - [`Error`], [`ErrorCode`]: transport-agnostic failures.

pub mod account;
pub mod account_service;
pub mod auth;
pub mod demo_data;
pub mod error;
pub mod note;
pub mod notebook_service;
pub mod password;
pub mod ports;
pub mod trace_id;

pub use self::account::{
    Account, AccountId, NewAccount, USERNAME_MAX, Username, UsernameValidationError,
};
pub use self::account_service::{AccountService, authenticate_with};
pub use self::auth::{Authority, Credentials, CredentialsValidationError, Principal};
pub use self::demo_data::{
    DEMO_ACCOUNTS, DemoAccount, DemoDataError, DemoDataOutcome, DemoDataSeeder,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::note::{NewNote, Note, NoteDraft, NoteId};
pub use self::notebook_service::NotebookService;
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
