//! Audit-trail domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use techmeet_core::{AdminUserId, AuditAction, AuditLogId};

/// One row of the append-only admin audit trail (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub admin_id: AdminUserId,
    /// Admin name captured at write time, so the trail survives admin
    /// deletion.
    pub admin_name: String,
    pub action: AuditAction,
    /// Resource kind, e.g. "project" or "team_member".
    pub resource: String,
    pub resource_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// The input to [`crate::services::audit::AuditRecorder::record`].
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub admin_id: AdminUserId,
    pub admin_name: String,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Builds an entry for the given acting admin.
    #[must_use]
    pub fn new(
        admin: &crate::models::admin_user::CurrentAdmin,
        action: AuditAction,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            admin_id: admin.id,
            admin_name: admin.name.clone(),
            action,
            resource: resource.into(),
            resource_id: None,
            details: None,
        }
    }

    #[must_use]
    pub fn resource_id(mut self, id: impl ToString) -> Self {
        self.resource_id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::admin_user::CurrentAdmin;
    use techmeet_core::{AdminRole, AuthUserId, Email};

    fn test_admin() -> CurrentAdmin {
        CurrentAdmin {
            id: AdminUserId::generate(),
            auth_user_id: AuthUserId::generate(),
            name: "Test Admin".to_owned(),
            email: Email::parse("admin@techmeet.kr").unwrap(),
            role: AdminRole::Admin,
        }
    }

    #[test]
    fn test_entry_builder() {
        let admin = test_admin();
        let entry = AuditEntry::new(&admin, AuditAction::BulkUpdate, "project")
            .resource_id("a,b,c")
            .details(serde_json::json!({"status": "open", "count": 3}));

        assert_eq!(entry.admin_id, admin.id);
        assert_eq!(entry.admin_name, "Test Admin");
        assert_eq!(entry.resource, "project");
        assert_eq!(entry.resource_id.as_deref(), Some("a,b,c"));
        assert_eq!(entry.details.unwrap()["count"], 3);
    }
}
