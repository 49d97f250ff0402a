//! Session commands

use auth::{AppError, RegisterProfile, RouteRequirement};
use serde_json::json;

use crate::app::{App, print_json};

pub async fn login(app: &App, username: &str, password: &str) -> anyhow::Result<()> {
    app.session
        .login(username, password)
        .await
        .map_err(AppError::from)?;
    // Resolve the identity so the output shows who signed in.
    let identity = app
        .session
        .refresh_identity()
        .await
        .map_err(AppError::from)?;
    print_json(&identity)
}

pub fn logout(app: &App) -> anyhow::Result<()> {
    let was_signed_in = app.session.vault().has_token();
    app.session.logout();
    print_json(&json!({ "signed_out": was_signed_in }))
}

pub async fn whoami(app: &App) -> anyhow::Result<()> {
    app.require(RouteRequirement::authenticated()).await?;
    // Always re-fetched so a revoked token is noticed here.
    let identity = app
        .session
        .refresh_identity()
        .await
        .map_err(AppError::from)?;
    print_json(&identity)
}

pub async fn register(
    app: &App,
    username: String,
    email: String,
    password: String,
    full_name: Option<String>,
) -> anyhow::Result<()> {
    let mut profile = RegisterProfile::new(username, email, password);
    if let Some(full_name) = full_name {
        profile = profile.with_full_name(full_name);
    }
    let identity = app
        .session
        .register(&profile)
        .await
        .map_err(AppError::from)?;
    print_json(&identity)
}
