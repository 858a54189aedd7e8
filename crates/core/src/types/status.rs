//! Status enums for the TechMeet entities.
//!
//! Every enum here is stored as `text` in PostgreSQL (with a CHECK
//! constraint) and crosses the API boundary as the same string. The
//! `text_enum!` macro wires up that single text literal for the
//! database, serde, `Display`, and `FromStr` so the representations
//! can never drift apart.

use serde::{Deserialize, Serialize};

/// Error returned when a stored status string is not a known variant.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid {kind} value: {value}")]
pub struct InvalidStatus {
    /// Which enum the value failed to parse into.
    pub kind: &'static str,
    /// The offending input.
    pub value: String,
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// The canonical string form, as stored in the database.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = InvalidStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    other => Err(InvalidStatus {
                        kind: stringify!($name),
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

text_enum! {
    /// Lifecycle status of a project listing.
    ProjectStatus {
        /// Saved but not yet visible to freelancers.
        Draft => "draft",
        /// Accepting applications.
        Open => "open",
        /// Applications under review.
        InReview => "in_review",
        /// Work underway.
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

text_enum! {
    /// Review status of a freelancer's application to a project.
    ApplicationStatus {
        Pending => "pending",
        Reviewed => "reviewed",
        Accepted => "accepted",
        Rejected => "rejected",
        Withdrawn => "withdrawn",
    }
}

text_enum! {
    /// Whether a platform user account is live or withdrawn.
    AccountStatus {
        Active => "active",
        Withdrawn => "withdrawn",
    }
}

text_enum! {
    /// Publication mode of a notice.
    NoticeType {
        Immediate => "immediate",
        Scheduled => "scheduled",
    }
}

text_enum! {
    /// Dispatch mode of a notification send.
    SendType {
        Immediate => "immediate",
        Scheduled => "scheduled",
    }
}

text_enum! {
    /// What kind of event a notification message relates to.
    ServiceType {
        Project => "project",
        Notice => "notice",
        Individual => "individual",
    }
}

text_enum! {
    /// Membership role inside a team.
    TeamRole {
        Leader => "leader",
        Member => "member",
    }
}

text_enum! {
    /// Capability level of a back-office administrator.
    ///
    /// `SuperAdmin` additionally holds the exclusive right to manage other
    /// admin accounts.
    AdminRole {
        SuperAdmin => "superadmin",
        Admin => "admin",
    }
}

text_enum! {
    /// Kind of mutation recorded in the audit log.
    AuditAction {
        Create => "create",
        Update => "update",
        Delete => "delete",
        BulkUpdate => "bulk_update",
        BulkDelete => "bulk_delete",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_role_text_roundtrip() {
        assert_eq!(AdminRole::SuperAdmin.as_str(), "superadmin");
        assert_eq!(AdminRole::Admin.as_str(), "admin");
        assert_eq!("superadmin".parse::<AdminRole>().unwrap(), AdminRole::SuperAdmin);
        assert!("viewer".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_project_status_covers_all_lifecycle_states() {
        for text in ["draft", "open", "in_review", "in_progress", "completed", "cancelled"] {
            let status: ProjectStatus = text.parse().unwrap();
            assert_eq!(status.as_str(), text);
        }
    }

    #[test]
    fn test_serde_matches_canonical_text_for_every_variant() {
        fn check<T>(variants: &[T])
        where
            T: Serialize
                + serde::de::DeserializeOwned
                + ::core::fmt::Debug
                + ::core::fmt::Display
                + PartialEq
                + Copy,
        {
            for variant in variants {
                let json = serde_json::to_string(variant).unwrap();
                assert_eq!(json, format!("\"{variant}\""));
                assert_eq!(serde_json::from_str::<T>(&json).unwrap(), *variant);
            }
        }

        check(&[
            ProjectStatus::Draft,
            ProjectStatus::Open,
            ProjectStatus::InReview,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::Cancelled,
        ]);
        check(&[
            ApplicationStatus::Pending,
            ApplicationStatus::Reviewed,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ]);
        check(&[AccountStatus::Active, AccountStatus::Withdrawn]);
        check(&[NoticeType::Immediate, NoticeType::Scheduled]);
        check(&[SendType::Immediate, SendType::Scheduled]);
        check(&[ServiceType::Project, ServiceType::Notice, ServiceType::Individual]);
        check(&[TeamRole::Leader, TeamRole::Member]);
        check(&[AdminRole::SuperAdmin, AdminRole::Admin]);
        check(&[
            AuditAction::Create,
            AuditAction::Update,
            AuditAction::Delete,
            AuditAction::BulkUpdate,
            AuditAction::BulkDelete,
        ]);
    }

    #[test]
    fn test_admin_role_serde_uses_superadmin_spelling() {
        assert_eq!(
            serde_json::to_string(&AdminRole::SuperAdmin).unwrap(),
            "\"superadmin\""
        );
        assert_eq!(
            serde_json::from_str::<AdminRole>("\"superadmin\"").unwrap(),
            AdminRole::SuperAdmin
        );
        assert!(serde_json::from_str::<AdminRole>("\"super_admin\"").is_err());
    }

    #[test]
    fn test_invalid_status_reports_kind_and_value() {
        let err = "frozen".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err.kind, "ApplicationStatus");
        assert_eq!(err.value, "frozen");
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(TeamRole::Leader.to_string(), "leader");
        assert_eq!(SendType::Scheduled.to_string(), "scheduled");
        assert_eq!(ServiceType::Individual.to_string(), "individual");
        assert_eq!(AccountStatus::Withdrawn.to_string(), "withdrawn");
        assert_eq!(NoticeType::Immediate.to_string(), "immediate");
    }
}
