//! Reference Table Definitions
//!
//! One descriptor per lookup table, plus the well-known names callers compare
//! against. A constant being listed here does not mean the table contains it;
//! looking up a missing one fails like any other unknown name.

// == Table Descriptor ==
/// Identifies a reference table, the columns to read and the registry key
/// its cache is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableDescriptor {
    /// Registry key
    pub key: &'static str,
    /// Table name
    pub table: &'static str,
    /// Integer id column
    pub id_column: &'static str,
    /// Unique name column
    pub name_column: &'static str,
}

impl TableDescriptor {
    /// SQL that reads every `(id, name)` pair of the table.
    pub fn query(&self) -> String {
        format!(
            "SELECT {}, {} FROM {}",
            self.id_column, self.name_column, self.table
        )
    }
}

/// Document privacy states.
pub mod document_privacy_state {
    use super::TableDescriptor;

    pub const TABLE: TableDescriptor = TableDescriptor {
        key: "documentPrivacyStateCache",
        table: "document_privacy_state",
        id_column: "id",
        name_column: "privacy_state",
    };

    pub const PRIVATE: &str = "private";
    pub const SHARED: &str = "shared";
}

/// Mobility privacy states.
pub mod mobility_privacy_state {
    use super::TableDescriptor;

    pub const TABLE: TableDescriptor = TableDescriptor {
        key: "mobilityPrivacyStateCache",
        table: "mobility_privacy_state",
        id_column: "Id",
        name_column: "privacy_state",
    };

    pub const PRIVATE: &str = "private";
    #[deprecated(note = "mobility points cannot be shared yet; only useful in WHERE clauses")]
    pub const SHARED: &str = "shared";
}

/// Survey response privacy states.
pub mod survey_response_privacy_state {
    use super::TableDescriptor;

    pub const TABLE: TableDescriptor = TableDescriptor {
        key: "surveyResponsePrivacyStateCache",
        table: "survey_response_privacy_state",
        id_column: "id",
        name_column: "privacy_state",
    };

    pub const INVISIBLE: &str = "invisible";
    pub const PRIVATE: &str = "private";
    pub const SHARED: &str = "shared";
}

/// Campaign privacy states.
pub mod campaign_privacy_state {
    use super::TableDescriptor;

    pub const TABLE: TableDescriptor = TableDescriptor {
        key: "campaignPrivacyStateCache",
        table: "campaign_privacy_state",
        id_column: "id",
        name_column: "privacy_state",
    };

    pub const PRIVATE: &str = "private";
    pub const SHARED: &str = "shared";
}

/// Campaign running states.
pub mod campaign_running_state {
    use super::TableDescriptor;

    pub const TABLE: TableDescriptor = TableDescriptor {
        key: "campaignRunningStateCache",
        table: "campaign_running_state",
        id_column: "id",
        name_column: "running_state",
    };

    pub const RUNNING: &str = "running";
    pub const STOPPED: &str = "stopped";
}

/// Roles a user can hold in a campaign.
pub mod campaign_role {
    use super::TableDescriptor;

    pub const TABLE: TableDescriptor = TableDescriptor {
        key: "campaignRoleCache",
        table: "user_role",
        id_column: "id",
        name_column: "role",
    };

    pub const SUPERVISOR: &str = "supervisor";
    pub const AUTHOR: &str = "author";
    pub const ANALYST: &str = "analyst";
    pub const PARTICIPANT: &str = "participant";
}

/// Roles a user can hold in a class.
pub mod class_role {
    use super::TableDescriptor;

    pub const TABLE: TableDescriptor = TableDescriptor {
        key: "classRoleCache",
        table: "user_class_role",
        id_column: "id",
        name_column: "role",
    };

    pub const PRIVILEGED: &str = "privileged";
    pub const RESTRICTED: &str = "restricted";
}

/// Every reference table the server caches.
pub const ALL: &[TableDescriptor] = &[
    document_privacy_state::TABLE,
    mobility_privacy_state::TABLE,
    survey_response_privacy_state::TABLE,
    campaign_privacy_state::TABLE,
    campaign_running_state::TABLE,
    campaign_role::TABLE,
    class_role::TABLE,
];
