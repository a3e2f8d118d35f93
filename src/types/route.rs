//! Route types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::AVERAGE_SPEED_MPH;

/// The routing-relevant projection of an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub appointment_id: Uuid,
    pub client_name: String,
    /// Stops without an address stay in display order but contribute no
    /// travel time in or out.
    pub address: Option<String>,
    pub estimated_duration_minutes: i32,
}

impl Stop {
    /// Project an appointment into its routing view.
    pub fn from_appointment(appointment: &super::Appointment) -> Self {
        Self {
            appointment_id: appointment.id,
            client_name: appointment.client.name.clone(),
            address: appointment.client.address.clone(),
            estimated_duration_minutes: appointment.effective_duration_minutes(),
        }
    }

    pub fn has_address(&self) -> bool {
        self.address.as_deref().map(|a| !a.trim().is_empty()).unwrap_or(false)
    }
}

/// One travel leg of a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    /// None for the leg leaving the base location.
    pub from_appointment_id: Option<Uuid>,
    /// None for the return leg back to base.
    pub to_appointment_id: Option<Uuid>,
    pub travel_minutes: i32,
}

/// An ordered day route anchored at the base location on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub stops: Vec<Stop>,
    pub legs: Vec<RouteLeg>,
    pub total_travel_minutes: i32,
    pub total_distance_miles: f64,
}

impl Route {
    /// Derive an estimated distance from summed travel minutes. There is no
    /// separate distance API; a fixed average speed stands in.
    pub fn miles_for_minutes(travel_minutes: i32) -> f64 {
        travel_minutes.max(0) as f64 / 60.0 * AVERAGE_SPEED_MPH
    }
}

/// A travel-time estimate for an ordered (origin, destination) pair.
///
/// `Unknown` is reserved for presentation layers that must say "cannot
/// calculate" rather than silently use a wrong number. The deterministic
/// fallback never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TravelTimeEstimate {
    Minutes(i32),
    Unknown,
}

/// Sentinel minute value carried on the wire for [`TravelTimeEstimate::Unknown`].
pub const UNKNOWN_TRAVEL_MINUTES: i32 = -1;

impl TravelTimeEstimate {
    /// Wire/legacy representation: minutes, or -1 for unknown.
    pub fn as_minutes(self) -> i32 {
        match self {
            TravelTimeEstimate::Minutes(m) => m,
            TravelTimeEstimate::Unknown => UNKNOWN_TRAVEL_MINUTES,
        }
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, TravelTimeEstimate::Unknown)
    }
}

/// Result of comparing the current visiting order against the
/// nearest-neighbor order. Ephemeral: recomputed per evaluation, discarded
/// when the day's appointment set changes or the user dismisses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptimizationResult {
    /// Applying the optimized order is worthwhile (saving above threshold).
    pub available: bool,
    /// Current order is already minimal within the threshold tolerance.
    pub is_optimal: bool,
    pub original_route: Route,
    pub optimized_route: Route,
    /// Clamped to >= 0; a negative saving is never surfaced.
    pub time_saved_minutes: i32,
    /// Clamped to >= 0.
    pub distance_saved_miles: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_with_blank_address_has_no_address() {
        let stop = Stop {
            appointment_id: Uuid::nil(),
            client_name: "A".to_string(),
            address: Some("   ".to_string()),
            estimated_duration_minutes: 60,
        };
        assert!(!stop.has_address());
    }

    #[test]
    fn unknown_estimate_maps_to_sentinel() {
        assert_eq!(TravelTimeEstimate::Unknown.as_minutes(), -1);
        assert_eq!(TravelTimeEstimate::Minutes(12).as_minutes(), 12);
    }

    #[test]
    fn miles_derivation_uses_average_speed() {
        // 60 minutes at 28 mph = 28 miles.
        assert!((Route::miles_for_minutes(60) - 28.0).abs() < 1e-9);
        // Negative travel never yields negative miles.
        assert_eq!(Route::miles_for_minutes(-5), 0.0);
    }
}
