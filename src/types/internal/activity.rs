use std::fmt;

/// Kinds of audited mutations
///
/// Stored as the string form in the activity table. Repairmen, companies and
/// admins all log under the user_* types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    LanternCreated,
    LanternUpdated,
    LanternDeleted,
    ParkCreated,
    ParkUpdated,
    ParkDeleted,
    UserCreated,
    UserUpdated,
    UserDeleted,
    DataExport,
    DataImport,
    BackupCreated,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::LanternCreated => "lantern_created",
            ActivityType::LanternUpdated => "lantern_updated",
            ActivityType::LanternDeleted => "lantern_deleted",
            ActivityType::ParkCreated => "park_created",
            ActivityType::ParkUpdated => "park_updated",
            ActivityType::ParkDeleted => "park_deleted",
            ActivityType::UserCreated => "user_created",
            ActivityType::UserUpdated => "user_updated",
            ActivityType::UserDeleted => "user_deleted",
            ActivityType::DataExport => "data_export",
            ActivityType::DataImport => "data_import",
            ActivityType::BackupCreated => "backup_created",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pending audit record, built at the mutation site
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub activity_type: ActivityType,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub description: String,
    pub details: Option<String>,
    pub performed_by: Option<String>,
}

impl NewActivity {
    pub fn new(
        activity_type: ActivityType,
        entity_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            activity_type,
            entity_type: entity_type.into(),
            entity_id: None,
            description: description.into(),
            details: None,
            performed_by: None,
        }
    }

    pub fn entity_id(mut self, id: i32) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn performed_by(mut self, actor: impl Into<String>) -> Self {
        self.performed_by = Some(actor.into());
        self
    }
}
