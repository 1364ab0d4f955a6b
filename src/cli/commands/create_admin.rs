use anyhow::{Context, Result};
use chrono::Utc;
use model::entities::practice::{self, PracticeRole};
use model::entities::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::{debug, info, trace, warn};

use crate::auth::hash_password;

/// Insert or promote a master admin. Returns the account id.
pub async fn ensure_admin(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
) -> Result<i32> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.len() < 6 {
        anyhow::bail!("An email and a password of at least 6 characters are required");
    }
    let password_hash = hash_password(password)?;

    let existing = Practice::find()
        .filter(practice::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;

    let admin = match existing {
        Some(model) => {
            warn!("Account {} already exists, promoting it to admin", model.id);
            let mut active: practice::ActiveModel = model.into();
            active.role = Set(PracticeRole::Admin);
            active.password_hash = Set(password_hash);
            active.update(db).await?
        }
        None => {
            debug!("Creating admin account '{}'", name);
            practice::ActiveModel {
                name: Set(name.to_string()),
                email: Set(email),
                password_hash: Set(password_hash),
                role: Set(PracticeRole::Admin),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    Ok(admin.id)
}

pub async fn create_admin(database_url: &str, name: &str, email: &str, password: &str) -> Result<()> {
    trace!("Entering create_admin function");
    let db = Database::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    let id = ensure_admin(&db, name, email, password).await?;
    info!("Master admin ready with ID: {}", id);
    Ok(())
}
