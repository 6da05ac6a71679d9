use rand::Rng;
use rand::distr::Alphanumeric;
use sea_orm::*;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::entity::contact_info::{self, SINGLETON_ID};
use crate::entity::admin_user;
use crate::error::AppError;
use crate::utils::hash;

/// Seed the first admin account when the table is empty.
///
/// The username comes from config. If no password is configured, a
/// random one is generated and logged once; it should be rotated after
/// the first login.
pub async fn seed_default_admin(db: &DatabaseConnection, auth: &AuthConfig) -> Result<(), AppError> {
    let existing = admin_user::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(());
    }

    let password = match &auth.default_admin_password {
        Some(p) => p.clone(),
        None => {
            let generated: String = rand::rng()
                .sample_iter(&Alphanumeric)
                .take(24)
                .map(char::from)
                .collect();
            warn!(
                "No default admin password configured. Generated one-time password for '{}': {}",
                auth.default_admin_username, generated
            );
            generated
        }
    };

    let password_hash = hash::hash_password(&password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let admin = admin_user::ActiveModel {
        username: Set(auth.default_admin_username.clone()),
        password: Set(password_hash),
        full_name: Set("Site Administrator".to_string()),
        email: Set("admin@localhost".to_string()),
        is_active: Set(true),
        last_login_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    admin.insert(db).await?;

    info!("Seeded default admin '{}'", auth.default_admin_username);
    Ok(())
}

/// Create the contact-info singleton with placeholder values if it does
/// not exist yet. Admins replace the placeholders from the panel.
pub async fn seed_contact_info(db: &DatabaseConnection) -> Result<(), AppError> {
    let row = contact_info::ActiveModel {
        id: Set(SINGLETON_ID),
        phone: Set("+0 000 000 0000".to_string()),
        email: Set("hello@example.com".to_string()),
        address: Set("Set your address in the admin panel".to_string()),
        working_hours: Set("Mon-Fri 9:00-17:00".to_string()),
        social_links: Set(serde_json::json!({})),
        updated_at: Set(chrono::Utc::now()),
    };

    let result = contact_info::Entity::insert(row)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(contact_info::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(n) if n > 0 => {
            info!("Seeded contact info singleton");
            Ok(())
        }
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
