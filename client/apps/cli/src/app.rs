//! Store wiring
//!
//! One `Transport` over the persisted token is shared by every store.

use std::sync::Arc;

use anyhow::{Context, bail};
use auth::{Access, DenyReason, HttpAuthGateway, RouteRequirement, SessionStore, can_enter};
use catalog::{CatalogStore, HttpCatalogGateway};
use platform::token::FileTokenStorage;
use platform::{ClientConfig, ReqwestBackend, TokenVault, Transport};
use serde::Serialize;
use submissions::{HttpSubmissionGateway, SubmissionStore};

pub struct App {
    pub config: ClientConfig,
    pub session: SessionStore<HttpAuthGateway<ReqwestBackend>>,
    pub catalog: CatalogStore<HttpCatalogGateway<ReqwestBackend>>,
    pub submissions: SubmissionStore<HttpSubmissionGateway<ReqwestBackend>>,
}

impl App {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let storage = FileTokenStorage::new(config.token_storage_path.clone());
        let vault = Arc::new(TokenVault::rehydrate(storage));

        let backend = ReqwestBackend::new(&config).context("Failed to build HTTP client")?;
        let transport = Arc::new(Transport::new(backend, vault.clone()));

        Ok(Self {
            session: SessionStore::new(HttpAuthGateway::new(transport.clone()), vault),
            catalog: CatalogStore::new(HttpCatalogGateway::new(transport.clone())),
            submissions: SubmissionStore::new(HttpSubmissionGateway::new(transport)),
            config,
        })
    }

    /// Run the access guard, resolving the identity when it is still pending
    pub async fn require(&self, requirement: RouteRequirement) -> anyhow::Result<()> {
        let mut access = can_enter(&self.session.snapshot(), &requirement);
        if access == Access::Pending {
            if let Err(err) = self.session.refresh_identity().await {
                tracing::debug!(error = %err.message(), "Identity could not be resolved");
            }
            access = can_enter(&self.session.snapshot(), &requirement);
        }

        match access {
            Access::Allow => Ok(()),
            Access::Deny(DenyReason::Unauthenticated) => {
                bail!("not signed in; run `skillslab login` first")
            }
            Access::Deny(DenyReason::Forbidden) => match requirement.requires_role {
                Some(role) => bail!("this command requires the {role} role"),
                None => bail!("access denied"),
            },
            Access::Pending => bail!("could not resolve the signed-in account"),
        }
    }
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
