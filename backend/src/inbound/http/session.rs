//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie carries only the authenticated username; every request
//! re-resolves it against the account store, so a deleted account or a
//! tampered value simply reads as "not logged in".

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Username};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh authenticated session for `username`.
    ///
    /// The session id is renewed first so a cookie captured before login
    /// cannot be replayed afterwards.
    pub fn establish(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop every value held in the session and expire the cookie.
    pub fn end(&self) {
        self.0.purge();
    }

    /// The authenticated username, if the session carries a valid one.
    pub fn username(&self) -> Result<Option<Username>, Error> {
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match Username::new(&value) {
            Ok(username) => Some(username),
            Err(error) => {
                tracing::warn!(%error, "invalid username in session cookie");
                None
            }
        }))
    }

    /// Require an authenticated username or return `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Username, Error> {
        self.username()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
