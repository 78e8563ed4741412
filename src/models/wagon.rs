//! Wagon records as returned by the upstream registry.
//!
//! Field names are aligned with the upstream JSON payload (PascalCase on the
//! wire). Records are read-only snapshots; nothing is persisted locally.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// A single wagon record from the upstream registry.
///
/// `VagonNumber` is the join key against stored photos. The upstream feed is
/// not entirely consistent about its types (numbers sometimes arrive as JSON
/// numbers), so the identifier accepts both and normalizes to a string.
/// Fields this server does not interpret are preserved via `extra` so the
/// API payload stays faithful to the source.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WagonRecord {
    /// Wagon number, the unique identifier.
    #[serde(rename = "VagonNumber", deserialize_with = "string_or_number")]
    pub vagon_number: String,

    /// Wagon type, e.g. gondola or tank car.
    #[serde(rename = "VagonType", skip_serializing_if = "Option::is_none")]
    pub vagon_type: Option<String>,

    /// Cargo currently assigned to the wagon.
    #[serde(rename = "CargoName", skip_serializing_if = "Option::is_none")]
    pub cargo_name: Option<String>,

    /// Owning company.
    #[serde(rename = "OwnerName", skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    /// Station the wagon departed from.
    #[serde(
        rename = "DepartureStationName",
        skip_serializing_if = "Option::is_none"
    )]
    pub departure_station_name: Option<String>,

    /// Upstream fields this server does not interpret, passed through as-is.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: serde_json::Map<String, JsonValue>,
}

/// Accept a JSON string or number and normalize to String.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    match value {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "VagonNumber must be a string or number, got {}",
            other
        ))),
    }
}
