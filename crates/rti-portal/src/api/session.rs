use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

/// Values persisted after a successful sign-in. Every authenticated call
/// carries `token` as a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub refresh_token: String,
    pub user_name: String,
    pub email: String,
    pub role: String,
    pub id: String,
}

/// Broadcast to subscribers whenever the session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Single owner of the active session. Components that need the credential
/// read it here instead of reaching into ambient storage, and interested
/// parties subscribe for change notifications.
#[derive(Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    listeners: Mutex<Vec<Listener>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, session: Session) {
        {
            let mut guard = self.current.write().expect("session lock poisoned");
            *guard = Some(session.clone());
        }
        self.notify(SessionEvent::SignedIn(session));
    }

    pub fn clear(&self) {
        let had_session = {
            let mut guard = self.current.write().expect("session lock poisoned");
            guard.take().is_some()
        };
        if had_session {
            self.notify(SessionEvent::SignedOut);
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .expect("session lock poisoned")
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .push(Box::new(listener));
    }

    fn notify(&self, event: SessionEvent) {
        let listeners = self.listeners.lock().expect("listener lock poisoned");
        for listener in listeners.iter() {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn session() -> Session {
        Session {
            token: "tok".to_string(),
            refresh_token: "refresh".to_string(),
            user_name: "clerk".to_string(),
            email: "clerk@rti.example.gov".to_string(),
            role: "operator".to_string(),
            id: "u-17".to_string(),
        }
    }

    #[test]
    fn set_and_clear_round_trip() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());

        store.set(session());
        assert_eq!(store.token().as_deref(), Some("tok"));

        store.clear();
        assert!(store.current().is_none());
    }

    #[test]
    fn subscribers_observe_both_transitions() {
        let store = SessionStore::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(move |event| sink.lock().expect("lock").push(event.clone()));

        store.set(session());
        store.clear();

        let seen = events.lock().expect("lock");
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], SessionEvent::SignedIn(_)));
        assert_eq!(seen[1], SessionEvent::SignedOut);
    }

    #[test]
    fn clearing_an_empty_store_emits_nothing() {
        let store = SessionStore::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(move |event| sink.lock().expect("lock").push(event.clone()));

        store.clear();
        assert!(events.lock().expect("lock").is_empty());
    }
}
