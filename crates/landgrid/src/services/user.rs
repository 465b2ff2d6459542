//! User service.
//!
//! Password hashing is an out-of-scope auth collaborator; this service
//! validates the raw password against the policy and hands it to an
//! injected [`PasswordHasher`], storing only the result.

use chrono::Utc;
use landgrid_store::{Database, Filter};
use landgrid_types::{ObjectId, Page, User};
use landgrid_validate::{ValidationReport, rules};
use tracing::info;

use crate::error::{Conflict, ServiceError, ServiceResult};
use crate::services::parse_id;

/// The out-of-scope hashing collaborator, at its interface.
pub trait PasswordHasher {
    fn hash(&self, raw: &str) -> String;
}

/// Payload for creating a user.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Raw password; validated here, hashed by the collaborator, never
    /// stored as-is.
    pub password: String,
    pub phone: Option<String>,
    /// Raw role id as received from the caller.
    pub role: Option<String>,
    pub address: Option<String>,
    pub created_by: Option<String>,
}

/// List query for users.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    /// Case-insensitive substring match on the user name.
    pub search: Option<String>,
    pub page: u64,
    pub limit: u64,
}

/// Creates a user. Email is unique across users.
pub fn create(
    db: &mut Database,
    hasher: &dyn PasswordHasher,
    input: NewUser,
) -> ServiceResult<User> {
    let mut report = ValidationReport::new();
    if input.name.trim().is_empty() {
        report.reject("name", "name is required");
    }
    let name = input.name.trim().to_string();
    let email = report.capture("email", input.email.clone(), rules::email(&input.email));
    let password = report.capture(
        "password",
        // Never echo the raw password back in a violation record.
        serde_json::Value::Null,
        rules::password(&input.password),
    );
    let phone = match &input.phone {
        Some(raw) => report.capture("phone", raw.clone(), rules::phone(raw)).map(Some),
        None => Some(None),
    };
    let role = match &input.role {
        Some(raw) => report.capture("role", raw.clone(), rules::object_id(raw)).map(Some),
        None => Some(None),
    };
    let created_by = match &input.created_by {
        Some(raw) => report
            .capture("createdBy", raw.clone(), rules::object_id(raw))
            .map(Some),
        None => Some(None),
    };

    let (Some(email), Some(password), Some(phone), Some(role), Some(created_by)) =
        (email, password, phone, role, created_by)
    else {
        return Err(ServiceError::Validation(report));
    };
    report.into_result().map_err(ServiceError::from)?;

    if let Some(role_id) = &role {
        if db.roles.get(role_id).is_none() {
            return Err(ServiceError::NotFound {
                entity: "role",
                id: role_id.clone(),
            });
        }
    }

    // Emails are stored normalized (lowercase), so equality is enough.
    let clashing = db.users.count(&Filter::all().eq("email", email.clone()))?;
    if clashing > 0 {
        return Err(Conflict::DuplicateEmail(email).into());
    }

    let user = User {
        id: ObjectId::generate(),
        name,
        email,
        password_hash: hasher.hash(&password),
        phone,
        role,
        address: input.address,
        is_active: true,
        created_by,
        created_at: Utc::now(),
    };

    db.users.insert(user.clone())?;
    info!(user = %user.id, email = %user.email, "user created");
    Ok(user)
}

/// Looks up one user.
pub fn get(db: &Database, id_raw: &str) -> ServiceResult<User> {
    let id = parse_id("id", id_raw)?;
    db.users
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "user", id })
}

/// Deactivates a user rather than removing the record, so references from
/// plots and bookings stay resolvable.
pub fn deactivate(db: &mut Database, id_raw: &str) -> ServiceResult<User> {
    let id = parse_id("id", id_raw)?;
    let mut user = db
        .users
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "user", id })?;
    user.is_active = false;
    db.users.update(user.clone())?;
    info!(user = %user.id, "user deactivated");
    Ok(user)
}

/// Lists users, paginated.
pub fn list(db: &Database, query: &UserListQuery) -> ServiceResult<(Vec<User>, Page)> {
    let mut filter = Filter::all();
    if let Some(search) = &query.search {
        filter = filter.contains("name", search.clone());
    }

    let matched = db.users.find(&filter)?;
    let total = matched.len() as u64;
    let page = Page::compute(total, query.limit, query.page);
    let (start, end) = Page::slice_bounds(total, query.limit, query.page);
    Ok((matched[start..end].to_vec(), page))
}
