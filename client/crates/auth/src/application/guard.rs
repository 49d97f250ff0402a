//! Access Guard
//!
//! The single place that decides whether a protected view may render.
//! Every role-gated surface goes through [`can_enter`].

use std::fmt;

use serde::Serialize;
use tokio::sync::watch;

use crate::application::store::{SessionState, SessionStore};
use crate::domain::entity::session::Session;
use crate::domain::value_object::user_role::UserRole;

/// What a view needs from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteRequirement {
    pub requires_auth: bool,
    pub requires_role: Option<UserRole>,
}

impl RouteRequirement {
    pub const fn public() -> Self {
        Self {
            requires_auth: false,
            requires_role: None,
        }
    }

    pub const fn authenticated() -> Self {
        Self {
            requires_auth: true,
            requires_role: None,
        }
    }

    /// A role requirement implies authentication
    pub const fn role(role: UserRole) -> Self {
        Self {
            requires_auth: true,
            requires_role: Some(role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    Unauthenticated,
    Forbidden,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DenyReason::Unauthenticated => "unauthenticated",
            DenyReason::Forbidden => "forbidden",
        })
    }
}

/// Guard verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// Identity not resolved yet; show a loading state, do not redirect
    Pending,
    Deny(DenyReason),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Decide access for `session` against `requirement`
pub fn can_enter(session: &Session, requirement: &RouteRequirement) -> Access {
    let needs_auth = requirement.requires_auth || requirement.requires_role.is_some();
    if needs_auth && session.token.is_none() {
        return Access::Deny(DenyReason::Unauthenticated);
    }

    let Some(role) = requirement.requires_role else {
        return Access::Allow;
    };

    match &session.identity {
        Some(identity) if identity.has_role(role) => Access::Allow,
        Some(_) => Access::Deny(DenyReason::Forbidden),
        // Not requested yet, or still in flight.
        None if !session.identity_status.is_settled() => Access::Pending,
        None => Access::Deny(DenyReason::Forbidden),
    }
}

/// Re-evaluates a requirement on every token or session change
pub struct AccessWatch {
    requirement: RouteRequirement,
    state: watch::Receiver<SessionState>,
    token: watch::Receiver<Option<String>>,
}

impl AccessWatch {
    /// Verdict for the current session
    pub fn current(&self) -> Access {
        let session = self.state.borrow().to_session(self.token.borrow().clone());
        can_enter(&session, &self.requirement)
    }

    /// Wait for the next session change and return the new verdict
    ///
    /// Returns `None` once the store and vault are gone.
    pub async fn changed(&mut self) -> Option<Access> {
        tokio::select! {
            result = self.state.changed() => result.ok()?,
            result = self.token.changed() => result.ok()?,
        }
        Some(self.current())
    }
}

/// Watch `requirement` against the store's session
pub fn watch_access<G>(store: &SessionStore<G>, requirement: RouteRequirement) -> AccessWatch {
    AccessWatch {
        requirement,
        state: store.subscribe(),
        token: store.vault().subscribe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::Identity;
    use crate::domain::entity::session::SessionLifecycle;
    use kernel::id::UserId;
    use kernel::lifecycle::RequestStatus;
    use std::collections::BTreeSet;

    fn identity(roles: &[UserRole]) -> Identity {
        Identity {
            id: UserId::new("1"),
            username: "alice".into(),
            email: "alice@example.com".into(),
            full_name: None,
            roles: roles.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    fn session(token: Option<&str>, identity: Option<Identity>, status: RequestStatus) -> Session {
        Session {
            token: token.map(String::from),
            identity,
            lifecycle: SessionLifecycle::Ready,
            last_error: None,
            identity_status: status,
        }
    }

    #[test]
    fn test_public_always_allows() {
        let anon = session(None, None, RequestStatus::Idle);
        assert_eq!(can_enter(&anon, &RouteRequirement::public()), Access::Allow);
    }

    #[test]
    fn test_no_token_is_unauthenticated_for_any_identity() {
        let identities = [
            None,
            Some(identity(&[UserRole::User])),
            Some(identity(&[UserRole::User, UserRole::Admin])),
        ];
        let statuses = [
            RequestStatus::Idle,
            RequestStatus::Loading,
            RequestStatus::Succeeded,
            RequestStatus::Failed,
        ];
        for who in &identities {
            for status in statuses {
                let anon = session(None, who.clone(), status);
                for requirement in [
                    RouteRequirement::authenticated(),
                    RouteRequirement::role(UserRole::Admin),
                ] {
                    assert_eq!(
                        can_enter(&anon, &requirement),
                        Access::Deny(DenyReason::Unauthenticated)
                    );
                }
            }
        }
    }

    #[test]
    fn test_role_without_auth_flag_still_requires_token() {
        let requirement = RouteRequirement {
            requires_auth: false,
            requires_role: Some(UserRole::Admin),
        };
        let anon = session(None, None, RequestStatus::Idle);
        assert_eq!(
            can_enter(&anon, &requirement),
            Access::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn test_token_is_enough_for_authenticated() {
        let s = session(Some("t"), None, RequestStatus::Loading);
        assert_eq!(can_enter(&s, &RouteRequirement::authenticated()), Access::Allow);
    }

    #[test]
    fn test_role_pending_while_identity_unresolved() {
        let admin = RouteRequirement::role(UserRole::Admin);
        for status in [RequestStatus::Idle, RequestStatus::Loading] {
            let s = session(Some("t"), None, status);
            assert_eq!(can_enter(&s, &admin), Access::Pending);
        }
    }

    #[test]
    fn test_role_checks_resolved_identity() {
        let admin = RouteRequirement::role(UserRole::Admin);

        let s = session(Some("t"), Some(identity(&[UserRole::User])), RequestStatus::Succeeded);
        assert_eq!(can_enter(&s, &admin), Access::Deny(DenyReason::Forbidden));

        let s = session(
            Some("t"),
            Some(identity(&[UserRole::User, UserRole::Admin])),
            RequestStatus::Succeeded,
        );
        assert_eq!(can_enter(&s, &admin), Access::Allow);
    }

    #[test]
    fn test_role_forbidden_when_identity_fetch_failed() {
        let s = session(Some("t"), None, RequestStatus::Failed);
        assert_eq!(
            can_enter(&s, &RouteRequirement::role(UserRole::Admin)),
            Access::Deny(DenyReason::Forbidden)
        );
    }
}
