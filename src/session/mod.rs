//! In-memory, per-session state for the stateful reasoning tools.
//!
//! State lives only for the lifetime of the process. Each session is keyed by
//! the caller-supplied id (`sessionId`, `decisionId`, `diagramId`) so that
//! concurrent callers never observe each other's artifacts.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

/// Session id used when a tool call does not name one.
pub const DEFAULT_SESSION: &str = "default";

/// Keyed store of accumulated session state.
///
/// Updates run against a draft copy of the session and are committed only
/// when the operation succeeds, so a rejected call leaves prior state intact.
pub struct SessionStore<T> {
    kind: &'static str,
    sessions: Mutex<HashMap<String, T>>,
}

impl<T: Clone + Default> SessionStore<T> {
    /// Create an empty store; `kind` labels log output.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Apply `operation` to the session, committing only on `Ok`.
    ///
    /// Sessions that do not exist yet start from `T::default()`; a failed
    /// first call therefore never creates the session.
    ///
    /// Each call clones the stored session, so its cost grows with the
    /// session's size. Sessions are bounded by one conversation's artifacts;
    /// if that stops holding, operations should validate before mutating and
    /// write in place instead.
    pub async fn update<R, E>(
        &self,
        session_id: &str,
        operation: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Result<R, E> {
        let mut sessions = self.sessions.lock().await;
        let mut draft = sessions.get(session_id).cloned().unwrap_or_default();

        let output = operation(&mut draft)?;

        sessions.insert(session_id.to_string(), draft);
        debug!(kind = self.kind, session_id = %session_id, "Session state committed");
        Ok(output)
    }

    /// Snapshot of a session's current state.
    pub async fn get(&self, session_id: &str) -> Option<T> {
        self.sessions.lock().await.get(session_id).cloned()
    }

    /// Number of sessions with committed state.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter {
        value: u32,
    }

    #[tokio::test]
    async fn test_update_commits_on_success() {
        let store: SessionStore<Counter> = SessionStore::new("counter");

        let value = store
            .update("s1", |c| {
                c.value += 1;
                Ok::<_, String>(c.value)
            })
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert_eq!(store.get("s1").await, Some(Counter { value: 1 }));
    }

    #[tokio::test]
    async fn test_update_discards_draft_on_failure() {
        let store: SessionStore<Counter> = SessionStore::new("counter");
        store
            .update("s1", |c| {
                c.value = 5;
                Ok::<_, String>(())
            })
            .await
            .unwrap();

        let result = store
            .update("s1", |c| {
                c.value = 99;
                Err::<(), _>("rejected".to_string())
            })
            .await;

        assert_eq!(result.unwrap_err(), "rejected");
        assert_eq!(store.get("s1").await, Some(Counter { value: 5 }));
    }

    #[tokio::test]
    async fn test_failed_first_call_creates_nothing() {
        let store: SessionStore<Counter> = SessionStore::new("counter");
        let _ = store
            .update("s1", |_| Err::<(), _>("nope".to_string()))
            .await;

        assert!(store.is_empty().await);
        assert!(store.get("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store: SessionStore<Counter> = SessionStore::new("counter");
        for id in ["a", "b", "a"] {
            store
                .update(id, |c| {
                    c.value += 1;
                    Ok::<_, String>(())
                })
                .await
                .unwrap();
        }

        assert_eq!(store.get("a").await.unwrap().value, 2);
        assert_eq!(store.get("b").await.unwrap().value, 1);
        assert_eq!(store.len().await, 2);
    }
}
