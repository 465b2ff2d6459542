//! Role service.

use chrono::Utc;
use landgrid_store::{Database, Filter};
use landgrid_types::{ObjectId, Page, Role};
use landgrid_validate::{ValidationReport, rules};
use tracing::info;

use crate::error::{Conflict, ServiceError, ServiceResult};
use crate::services::parse_id;

/// Payload for creating a role.
#[derive(Debug, Clone, Default)]
pub struct NewRole {
    pub name: String,
    pub description: Option<String>,
    /// Permission tokens; the literal `"all"` grants everything.
    pub permissions: Vec<String>,
    pub level: i32,
    pub created_by: Option<String>,
}

/// Creates a role.
pub fn create(db: &mut Database, input: NewRole) -> ServiceResult<Role> {
    let mut report = ValidationReport::new();
    if input.name.trim().is_empty() {
        report.reject("name", "name is required");
    }
    let created_by = match &input.created_by {
        Some(raw) => report
            .capture("createdBy", raw.clone(), rules::object_id(raw))
            .map(Some),
        None => Some(None),
    };
    let Some(created_by) = created_by else {
        return Err(ServiceError::Validation(report));
    };
    report.into_result().map_err(ServiceError::from)?;

    let mut permissions: Vec<String> = input
        .permissions
        .into_iter()
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect();
    permissions.sort();
    permissions.dedup();

    let role = Role {
        id: ObjectId::generate(),
        name: input.name.trim().to_string(),
        description: input.description,
        permissions,
        level: input.level,
        is_active: true,
        created_by,
        created_at: Utc::now(),
    };

    db.roles.insert(role.clone())?;
    info!(role = %role.id, name = %role.name, "role created");
    Ok(role)
}

/// Deletes a role. Rejected while any user references it; the conflict
/// leaves both the role and the referencing users unchanged.
pub fn delete(db: &mut Database, id_raw: &str) -> ServiceResult<Role> {
    let id = parse_id("id", id_raw)?;
    let role = db
        .roles
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "role", id })?;

    let referencing = db
        .users
        .count(&Filter::all().eq("role", role.id.as_str()))?;
    if referencing > 0 {
        return Err(Conflict::RoleInUse(role.id).into());
    }

    let removed = db.roles.remove(&role.id)?;
    info!(role = %removed.id, "role deleted");
    Ok(removed)
}

/// Looks up one role.
pub fn get(db: &Database, id_raw: &str) -> ServiceResult<Role> {
    let id = parse_id("id", id_raw)?;
    db.roles
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "role", id })
}

/// Lists all roles, paginated.
pub fn list(db: &Database, page_num: u64, limit: u64) -> ServiceResult<(Vec<Role>, Page)> {
    let matched = db.roles.find(&Filter::all())?;
    let total = matched.len() as u64;
    let page = Page::compute(total, limit, page_num);
    let (start, end) = Page::slice_bounds(total, limit, page_num);
    Ok((matched[start..end].to_vec(), page))
}
