//! Appointment types
//!
//! Appointments are owned by the persistence collaborator; the core reads
//! them and proposes time/duration mutations through `AppointmentUpdate`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client contact details, read-only from the core's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub name: String,
    /// Missing address excludes the appointment from travel-time math.
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl ClientInfo {
    /// Address usable for travel-time lookups; whitespace-only strings
    /// count as missing, matching [`crate::types::Stop::has_address`].
    pub fn routable_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// A service entry as stored by the backend.
///
/// Historic records store a bare service code, newer ones an object with
/// `id` and `name`. The untagged enum absorbs both shapes at the serde
/// boundary; everything downstream goes through [`ServiceEntry::code`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceEntry {
    Code(String),
    Detailed { id: String, name: String },
}

impl ServiceEntry {
    /// Canonical service code for duration/pricing lookups.
    pub fn code(&self) -> &str {
        match self {
            ServiceEntry::Code(code) => code,
            ServiceEntry::Detailed { id, .. } => id,
        }
    }

    /// Human-readable label for display.
    pub fn display_name(&self) -> &str {
        match self {
            ServiceEntry::Code(code) => code,
            ServiceEntry::Detailed { name, .. } => name,
        }
    }
}

/// An appointment as read from the persistence collaborator.
///
/// `time` and `end_time` are wall-clock strings ("H:MM AM/PM") because that
/// is the stored representation; `services::time_math` converts them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub client: ClientInfo,
    pub services: Vec<ServiceEntry>,
    pub date: NaiveDate,
    /// Start time-of-day, e.g. "9:00 AM".
    pub time: String,
    /// Derived end time-of-day. `end_time == time + duration` whenever both
    /// are present; the core is the sole writer of this after a reschedule.
    pub end_time: Option<String>,
    /// Explicit duration override in minutes. When absent, duration is
    /// derived from services and pet count.
    pub duration_minutes: Option<i32>,
    #[serde(default = "default_pet_count")]
    pub pet_count: i32,
    /// Opaque to the core.
    pub status: Option<String>,
    /// Opaque to the core.
    pub payment_status: Option<String>,
}

fn default_pet_count() -> i32 {
    1
}

impl Appointment {
    /// Duration in minutes: explicit override first, else derived from the
    /// service list and pet count.
    pub fn effective_duration_minutes(&self) -> i32 {
        match self.duration_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => crate::services::time_math::duration_for_services(&self.services, self.pet_count),
        }
    }
}

/// Partial update written back through the persistence collaborator.
///
/// Identical inputs must be idempotent on the store side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_entry_deserializes_bare_code() {
        let entry: ServiceEntry = serde_json::from_str("\"bath\"").unwrap();
        assert_eq!(entry.code(), "bath");
        assert_eq!(entry.display_name(), "bath");
    }

    #[test]
    fn service_entry_deserializes_object_form() {
        let entry: ServiceEntry =
            serde_json::from_str(r#"{"id":"full_groom","name":"Full Grooming"}"#).unwrap();
        assert_eq!(entry.code(), "full_groom");
        assert_eq!(entry.display_name(), "Full Grooming");
    }

    #[test]
    fn routable_address_rejects_blank_strings() {
        let mut client = ClientInfo {
            name: "Test".to_string(),
            address: Some("  88 Palmetto Ave ".to_string()),
            phone: None,
        };
        assert_eq!(client.routable_address(), Some("88 Palmetto Ave"));

        client.address = Some("   ".to_string());
        assert_eq!(client.routable_address(), None);

        client.address = None;
        assert_eq!(client.routable_address(), None);
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = AppointmentUpdate {
            time: Some("10:20 AM".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"time":"10:20 AM"}"#);
    }

    #[test]
    fn explicit_duration_wins_over_derived() {
        let appointment = Appointment {
            id: Uuid::nil(),
            client: ClientInfo {
                name: "Test".to_string(),
                address: None,
                phone: None,
            },
            services: vec![ServiceEntry::Code("bath".to_string())],
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            time: "9:00 AM".to_string(),
            end_time: None,
            duration_minutes: Some(75),
            pet_count: 1,
            status: None,
            payment_status: None,
        };
        assert_eq!(appointment.effective_duration_minutes(), 75);
    }
}
