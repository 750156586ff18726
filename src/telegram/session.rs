//! Per-user conversation state
//!
//! Sessions are keyed by the sender's Telegram user id, so members of one
//! group each fill in their own forms. A user has at most one active
//! conversation. Handlers `take` it out,
//! feed it the message and `put` it back when more input is expected, so
//! the lock is never held across a network call.

use super::wizards::{BurnDraft, BurnWizard, LiquidityDraft, LiquidityWizard, TokenWizard};
use crate::database::AuthorityKind;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub enum Conversation {
    CreateToken(TokenWizard),
    AddLiquidity(LiquidityWizard),
    Burn(BurnWizard),
    /// Waiting for a mint address to revoke `AuthorityKind` on
    RevokeByAddress(AuthorityKind),
    /// Waiting for ✅ / ❌ on a described pool
    PendingLiquidity(LiquidityDraft),
    PendingBurn(BurnDraft),
}

impl Conversation {
    pub fn name(&self) -> &'static str {
        match self {
            Conversation::CreateToken(_) => "create_token",
            Conversation::AddLiquidity(_) => "add_liquidity",
            Conversation::Burn(_) => "burn",
            Conversation::RevokeByAddress(_) => "revoke_by_address",
            Conversation::PendingLiquidity(_) => "pending_liquidity",
            Conversation::PendingBurn(_) => "pending_burn",
        }
    }
}

#[derive(Debug)]
struct Session {
    conversation: Conversation,
    last_activity: Instant,
}

/// Outcome of `SessionStore::take`
#[derive(Debug, PartialEq)]
pub enum Taken {
    Active(Conversation),
    Expired,
    Empty,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<u64, Session>>,
    timeout: Option<Duration>,
}

impl SessionStore {
    /// `None` keeps sessions until they finish or are cancelled
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    /// Zero or negative minutes disable expiry
    pub fn from_minutes(minutes: i64) -> Self {
        let timeout =
            (minutes > 0).then(|| Duration::from_secs(minutes as u64).saturating_mul(60));
        Self::new(timeout)
    }

    fn is_expired(&self, session: &Session) -> bool {
        self.timeout
            .map(|timeout| session.last_activity.elapsed() >= timeout)
            .unwrap_or(false)
    }

    /// Replace whatever the user was doing
    pub async fn put(&self, user_id: u64, conversation: Conversation) {
        self.sessions.write().await.insert(
            user_id,
            Session {
                conversation,
                last_activity: Instant::now(),
            },
        );
    }

    /// Remove and return the user's conversation
    pub async fn take(&self, user_id: u64) -> Taken {
        let Some(session) = self.sessions.write().await.remove(&user_id) else {
            return Taken::Empty;
        };
        if self.is_expired(&session) {
            Taken::Expired
        } else {
            Taken::Active(session.conversation)
        }
    }

    /// Drop the user's conversation; true when one was active
    pub async fn clear(&self, user_id: u64) -> bool {
        match self.sessions.write().await.remove(&user_id) {
            Some(session) => !self.is_expired(&session),
            None => false,
        }
    }

    /// Look at the active conversation without taking it
    pub async fn inspect<R>(&self, user_id: u64, f: impl FnOnce(&Conversation) -> R) -> Option<R> {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .filter(|session| !self.is_expired(session))
            .map(|session| f(&session.conversation))
    }

    /// Remove every expired session, returning how many were dropped
    pub async fn prune_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session));
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_take() {
        let store = SessionStore::new(None);
        assert_eq!(store.take(1).await, Taken::Empty);

        store
            .put(1, Conversation::RevokeByAddress(AuthorityKind::Mint))
            .await;
        assert_eq!(store.take(2).await, Taken::Empty);

        assert_eq!(
            store.take(1).await,
            Taken::Active(Conversation::RevokeByAddress(AuthorityKind::Mint))
        );
        assert_eq!(store.take(1).await, Taken::Empty);
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = SessionStore::new(None);
        store.put(7, Conversation::CreateToken(TokenWizard::new())).await;
        store
            .put(7, Conversation::RevokeByAddress(AuthorityKind::Freeze))
            .await;

        match store.take(7).await {
            Taken::Active(conversation) => assert_eq!(conversation.name(), "revoke_by_address"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_expired_sessions() {
        let store = SessionStore::new(Some(Duration::ZERO));
        store.put(1, Conversation::CreateToken(TokenWizard::new())).await;
        assert_eq!(store.take(1).await, Taken::Expired);
        assert_eq!(store.take(1).await, Taken::Empty);

        store.put(2, Conversation::CreateToken(TokenWizard::new())).await;
        store.put(3, Conversation::CreateToken(TokenWizard::new())).await;
        assert_eq!(store.prune_expired().await, 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = SessionStore::from_minutes(30);
        assert!(!store.clear(1).await);
        store.put(1, Conversation::CreateToken(TokenWizard::new())).await;
        assert!(store.clear(1).await);
        assert_eq!(store.take(1).await, Taken::Empty);
    }

    #[tokio::test]
    async fn test_inspect_keeps_session() {
        let store = SessionStore::new(None);
        assert_eq!(store.inspect(5, Conversation::name).await, None);

        store
            .put(5, Conversation::RevokeByAddress(AuthorityKind::Mint))
            .await;
        assert_eq!(
            store.inspect(5, Conversation::name).await,
            Some("revoke_by_address")
        );
        assert!(matches!(store.take(5).await, Taken::Active(_)));
    }

    #[test]
    fn test_from_minutes() {
        assert!(SessionStore::from_minutes(0).timeout.is_none());
        assert_eq!(
            SessionStore::from_minutes(2).timeout,
            Some(Duration::from_secs(120))
        );
    }

    #[test]
    fn test_huge_timeout_saturates() {
        assert_eq!(
            SessionStore::from_minutes(i64::MAX).timeout,
            Some(Duration::MAX)
        );
    }
}
