//! Per-user sessions keyed by an opaque cookie.
//!
//! Handlers `open` a session at the start of a request, pass it to the offer
//! operations as an `OfferStore`, and `commit` it with the response. Only
//! sessions that were written are saved and get a `Set-Cookie`.

pub mod store;

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::Response,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::offer::context::OfferStore;
use crate::offer::models::{BenchmarkBand, Offer};
use crate::session::store::SessionStore;

pub const SESSION_COOKIE: &str = "offerwise_session";

/// Everything persisted for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub offer: Option<Offer>,
    #[serde(default)]
    pub benchmarks: Option<BenchmarkBand>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request-scoped view of a session.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    data: SessionData,
    dirty: bool,
}

impl Session {
    pub fn fresh() -> Self {
        Self::existing(Uuid::new_v4(), SessionData::default())
    }

    pub fn existing(id: Uuid, data: SessionData) -> Self {
        Self {
            id,
            data,
            dirty: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.data.updated_at = Some(Utc::now());
    }
}

impl OfferStore for Session {
    fn offer(&self) -> Option<&Offer> {
        self.data.offer.as_ref()
    }

    fn save_offer(&mut self, offer: Offer) {
        self.data.offer = Some(offer);
        self.touch();
    }

    fn benchmarks(&self) -> Option<&BenchmarkBand> {
        self.data.benchmarks.as_ref()
    }

    fn save_benchmarks(&mut self, band: BenchmarkBand) {
        self.data.benchmarks = Some(band);
        self.touch();
    }
}

/// Opens and commits sessions against the configured store.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl_secs: u64,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, ttl_secs: u64) -> Self {
        Self { store, ttl_secs }
    }

    /// Loads the session named by the request cookie. A missing, malformed or
    /// unknown id yields a fresh, empty session with a new id.
    pub async fn open(&self, headers: &HeaderMap) -> Result<Session, AppError> {
        let Some(id) = session_id_from_headers(headers) else {
            return Ok(Session::fresh());
        };
        match self.store.load(id).await? {
            Some(data) => Ok(Session::existing(id, data)),
            None => {
                debug!(session_id = %id, "unknown session id, starting fresh");
                Ok(Session::fresh())
            }
        }
    }

    /// Persists a written session and attaches its cookie to the response.
    pub async fn commit(
        &self,
        session: &Session,
        mut response: Response,
    ) -> Result<Response, AppError> {
        if !session.is_dirty() {
            return Ok(response);
        }
        self.store.save(session.id(), session.data()).await?;
        debug!(session_id = %session.id(), "session saved");

        let cookie = HeaderValue::from_str(&session_cookie(session.id(), self.ttl_secs))
            .map_err(|e| AppError::Internal(e.into()))?;
        response.headers_mut().append(header::SET_COOKIE, cookie);
        Ok(response)
    }
}

pub fn session_cookie(id: Uuid, ttl_secs: u64) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}")
}

/// Extracts the session id from any `Cookie` header on the request.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
