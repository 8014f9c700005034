use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::api::ApiError;

pub const NAME_PLACEHOLDER: &str = "Unnamed Container";
pub const IMAGE_PLACEHOLDER: &str = "Unknown image";

/// Lifecycle state of a container as reported by the fleet API.
/// Anything outside the closed set collapses to `Inactive`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerStatus {
    Running,
    Exited,
    Inactive,
}

impl ContainerStatus {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
            Some("running") => ContainerStatus::Running,
            Some("exited") => ContainerStatus::Exited,
            _ => ContainerStatus::Inactive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerStatus::Running => "running",
            ContainerStatus::Exited => "exited",
            ContainerStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Canonical container entry, immutable for the lifetime of a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerRecord {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
}

/// Container ids are 12 to 64 hex characters, case-insensitive.
pub fn is_valid_container_id(id: &str) -> bool {
    (12..=64).contains(&id.len()) && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Raw API entry before validation. Fields keep their JSON form so that
/// wrong-typed values coerce the same way missing ones do.
#[derive(Deserialize)]
struct RawContainer {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    image: Value,
    #[serde(default)]
    status: Value,
}

fn display_field(value: &Value, placeholder: &str) -> String {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

/// Validate and coerce a single raw entry. Entries that are not objects or
/// whose id fails the hex pattern are dropped.
fn normalize_entry(value: Value) -> Option<ContainerRecord> {
    let raw: RawContainer = serde_json::from_value(value).ok()?;

    let id = raw.id.as_str().unwrap_or("").trim().to_string();
    if !is_valid_container_id(&id) {
        return None;
    }

    Some(ContainerRecord {
        id,
        name: display_field(&raw.name, NAME_PLACEHOLDER),
        image: display_field(&raw.image, IMAGE_PLACEHOLDER),
        status: ContainerStatus::from_raw(raw.status.as_str()),
    })
}

/// Normalize a `GET /containers` payload into canonical records, preserving
/// server order. A non-array payload fails the whole fetch; malformed
/// elements are dropped individually.
pub fn normalize_list(payload: Value) -> Result<Vec<ContainerRecord>, ApiError> {
    let Value::Array(entries) = payload else {
        return Err(ApiError::InvalidPayload);
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        match normalize_entry(entry) {
            Some(record) => records.push(record),
            None => tracing::debug!("dropped malformed container entry"),
        }
    }
    Ok(records)
}
