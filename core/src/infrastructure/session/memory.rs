use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use chrono::{TimeDelta, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    common::{DEFAULT_SESSION_IDLE_TTL_SECS, entities::app_errors::CoreError},
    session::{entities::Session, ports::SessionRepository},
};

/// Process-local session registry. Sessions vanish on restart.
///
/// Idle sessions are swept whenever a new one is created; a session with a
/// call in flight is kept until the call settles.
#[derive(Debug)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<Uuid, Session>>,
    idle_ttl: TimeDelta,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::with_idle_ttl(DEFAULT_SESSION_IDLE_TTL_SECS)
    }

    pub fn with_idle_ttl(idle_ttl_secs: u64) -> Self {
        let idle_ttl = i64::try_from(idle_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);

        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, Session>) {
        let now = Utc::now();
        let before = sessions.len();

        sessions.retain(|_, session| {
            session.state().is_waiting() || now - session.updated_at <= self.idle_ttl
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, CoreError> {
        self.sessions.lock().map_err(|e| {
            tracing::error!("Session registry lock poisoned: {}", e);
            CoreError::InternalServerError
        })
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn create(&self, session: Session) -> Result<Session, CoreError> {
        let mut sessions = self.lock()?;
        self.evict_idle(&mut sessions);
        sessions.insert(session.id, session.clone());

        Ok(session)
    }

    fn get_by_id(&self, session_id: Uuid) -> Result<Option<Session>, CoreError> {
        Ok(self.lock()?.get(&session_id).cloned())
    }

    fn update<T, F>(&self, session_id: Uuid, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(CoreError::SessionNotFound)?;

        Ok(f(session))
    }

    fn delete(&self, session_id: Uuid) -> Result<(), CoreError> {
        self.lock()?
            .remove(&session_id)
            .map(|_| ())
            .ok_or(CoreError::SessionNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::entities::AppState;

    fn idle_session(idle_for: TimeDelta) -> Session {
        let mut session = Session::new();
        session.updated_at = Utc::now() - idle_for;
        session
    }

    #[test]
    fn test_create_and_get() {
        let repository = InMemorySessionRepository::new();
        let session = repository.create(Session::new()).unwrap();

        let found = repository.get_by_id(session.id).unwrap().unwrap();
        assert_eq!(found.id, session.id);
        assert!(repository.get_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_update_applies_in_place() {
        let repository = InMemorySessionRepository::new();
        let session = repository.create(Session::new()).unwrap();

        let ticket = repository
            .update(session.id, |s| s.begin_detection())
            .unwrap()
            .unwrap();

        assert_eq!(ticket.session_id, session.id);
        let stored = repository.get_by_id(session.id).unwrap().unwrap();
        assert_eq!(stored.state(), AppState::Detecting);
    }

    #[test]
    fn test_update_unknown_session() {
        let repository = InMemorySessionRepository::new();
        let result = repository.update(Uuid::new_v4(), |s| s.state());
        assert_eq!(result, Err(CoreError::SessionNotFound));
    }

    #[test]
    fn test_delete() {
        let repository = InMemorySessionRepository::new();
        let session = repository.create(Session::new()).unwrap();

        repository.delete(session.id).unwrap();

        assert_eq!(repository.delete(session.id), Err(CoreError::SessionNotFound));
    }

    #[test]
    fn test_create_evicts_idle_sessions() {
        let repository = InMemorySessionRepository::with_idle_ttl(60);
        let stale = repository
            .create(idle_session(TimeDelta::minutes(5)))
            .unwrap();
        let recent = repository
            .create(idle_session(TimeDelta::seconds(10)))
            .unwrap();

        repository.create(Session::new()).unwrap();

        assert!(repository.get_by_id(stale.id).unwrap().is_none());
        assert!(repository.get_by_id(recent.id).unwrap().is_some());
    }

    #[test]
    fn test_waiting_sessions_survive_eviction() {
        let repository = InMemorySessionRepository::with_idle_ttl(60);
        let mut waiting = idle_session(TimeDelta::minutes(5));
        waiting.begin_detection().unwrap();
        waiting.updated_at = Utc::now() - TimeDelta::minutes(5);
        let waiting = repository.create(waiting).unwrap();

        repository.create(Session::new()).unwrap();

        let kept = repository.get_by_id(waiting.id).unwrap().unwrap();
        assert_eq!(kept.state(), AppState::Detecting);
    }
}
