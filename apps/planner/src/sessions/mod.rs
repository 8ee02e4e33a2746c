//! Planning sessions — one explicit object per student session owning the cart,
//! the confirmed schedule and the last catalog result.
//!
//! Each session sits behind its own mutex. Timetable operations are synchronous,
//! so the lock is never held across an `.await`.

pub mod handlers;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::CatalogQuery;
use crate::errors::AppError;
use crate::timetable::summary::Preferences;
use crate::timetable::{CourseOffering, SelectionSet};

#[derive(Debug)]
pub struct PlannerSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub selection: SelectionSet,
    pub catalog: Vec<CourseOffering>,
    pub query: Option<CatalogQuery>,
    pub created_at: DateTime<Utc>,
}

/// Serializable view of a session's state.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub cart: Vec<CourseOffering>,
    pub schedule: Vec<CourseOffering>,
    pub total_credits: u32,
    pub catalog_size: usize,
    pub created_at: DateTime<Utc>,
}

impl PlannerSession {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            selection: SelectionSet::new(),
            catalog: Vec::new(),
            query: None,
            created_at: Utc::now(),
        }
    }

    /// Caches a fresh catalog result. Cart and schedule are kept.
    pub fn set_catalog(&mut self, query: CatalogQuery, offerings: Vec<CourseOffering>) {
        self.query = Some(query);
        self.catalog = offerings;
    }

    /// Looks `offering_id` up in the cached catalog and puts it in the cart.
    /// Returns `false` if it was already in the cart or schedule.
    pub fn add_from_catalog(&mut self, offering_id: &str) -> Result<bool, AppError> {
        let offering = self
            .catalog
            .iter()
            .find(|o| o.id == offering_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Offering '{offering_id}' is not in the catalog"))
            })?;
        Ok(self.selection.add_to_cart(offering))
    }

    /// Preferences from the last catalog query, or the defaults.
    pub fn preferences(&self) -> Preferences {
        self.query
            .as_ref()
            .map(CatalogQuery::preferences)
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            user_id: self.user_id,
            cart: self.selection.cart().to_vec(),
            schedule: self.selection.schedule().to_vec(),
            total_credits: self.selection.total_credits(),
            catalog_size: self.catalog.len(),
            created_at: self.created_at,
        }
    }
}

pub type SharedSession = Arc<Mutex<PlannerSession>>;

/// All open sessions, keyed by session id.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    pub fn create(&self, user_id: Uuid) -> Result<SharedSession, AppError> {
        let session = PlannerSession::new(user_id);
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| anyhow::anyhow!("session registry lock poisoned"))?;
        if sessions.len() >= self.capacity {
            return Err(AppError::Validation(format!(
                "Too many open sessions (limit {})",
                self.capacity
            )));
        }
        sessions.insert(id, Arc::clone(&shared));
        info!(session_id = %id, user_id = %user_id, "Planning session created");
        Ok(shared)
    }

    pub fn get(&self, id: Uuid) -> Result<SharedSession, AppError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| anyhow::anyhow!("session registry lock poisoned"))?;
        sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| anyhow::anyhow!("session registry lock poisoned"))?;
        sessions
            .remove(&id)
            .map(|_| info!(session_id = %id, "Planning session closed"))
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

/// Locks one session.
pub fn lock(session: &SharedSession) -> Result<MutexGuard<'_, PlannerSession>, AppError> {
    session
        .lock()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("session lock poisoned")))
}
