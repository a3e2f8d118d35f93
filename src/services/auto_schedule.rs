//! Sequential auto-scheduling.
//!
//! Given a visiting order (the original chronological one, or the
//! optimizer's output), recompute each appointment's start and end so that
//! service time plus inter-stop travel never overlaps. The first
//! appointment's start is the anchor and is preserved as-is.

use tracing::{info, warn};
use uuid::Uuid;

use crate::persistence::AppointmentStore;
use crate::services::time_math::{format_minutes, parse_time_or_noon};
use crate::services::travel_time::TravelTimeProvider;
use crate::types::{Appointment, AppointmentUpdate};

/// One appointment whose write-back failed.
#[derive(Debug, Clone)]
pub struct RescheduleFailure {
    pub appointment_id: Uuid,
    pub error: String,
}

/// Outcome of a reschedule pass.
///
/// There is no rollback: `appointments` reflects the proposed times for
/// every entry, `failures` lists the ones whose write did not land, and the
/// UI must render actual post-attempt state.
#[derive(Debug, Clone)]
pub struct RescheduleOutcome {
    pub appointments: Vec<Appointment>,
    pub failures: Vec<RescheduleFailure>,
    /// False when any start time had to be defaulted from a malformed
    /// stored string; the result is still usable but best-effort.
    pub exact: bool,
}

/// Recompute start/end times along the given order and persist each change.
///
/// The recurrence: `start[i] = end[i-1] + travel(address[i-1], address[i])`,
/// `end[i] = start[i] + duration[i]`. Travel is never negative, so
/// consecutive appointments cannot overlap. Appointments without an address
/// hold their slot with zero travel in and out. A failed write is reported
/// per item and does not abort the rest.
pub async fn reschedule(
    ordered: &[Appointment],
    provider: &dyn TravelTimeProvider,
    store: &dyn AppointmentStore,
) -> RescheduleOutcome {
    let mut appointments = Vec::with_capacity(ordered.len());
    let mut failures = Vec::new();
    let mut exact = true;

    let mut previous_end: Option<i32> = None;
    let mut previous_address: Option<String> = None;

    for original in ordered {
        let (stored_start, parsed_ok) = parse_time_or_noon(&original.time);
        if !parsed_ok {
            warn!(
                "Appointment {} has malformed start {:?}; assuming noon",
                original.id, original.time
            );
            exact = false;
        }

        let start = match previous_end {
            // First stop anchors the day.
            None => stored_start,
            Some(end) => {
                let travel = match (previous_address.as_deref(), original.client.routable_address())
                {
                    (Some(from), Some(to)) => provider.estimate(from, to).await,
                    // Missing or blank address on either side: no travel penalty.
                    _ => 0,
                };
                end + travel
            }
        };

        let duration = original.effective_duration_minutes();
        let end = start + duration;

        let mut updated = original.clone();
        updated.time = format_minutes(start);
        updated.end_time = Some(format_minutes(end));
        updated.duration_minutes = Some(duration);

        let changed = updated.time != original.time
            || updated.end_time != original.end_time
            || updated.duration_minutes != original.duration_minutes;

        if changed {
            let update = AppointmentUpdate {
                time: Some(updated.time.clone()),
                end_time: Some(updated.end_time.clone().unwrap_or_default()),
                duration_minutes: Some(duration),
                date: None,
            };
            if let Err(e) = store.update_appointment(original.id, &update).await {
                warn!("Failed to persist reschedule for {}: {e:#}", original.id);
                failures.push(RescheduleFailure {
                    appointment_id: original.id,
                    error: format!("{e:#}"),
                });
            }
        }

        previous_end = Some(end);
        if let Some(address) = original.client.routable_address() {
            previous_address = Some(address.to_string());
        }

        appointments.push(updated);
    }

    info!(
        "Rescheduled {} appointments ({} persistence failures)",
        appointments.len(),
        failures.len()
    );

    RescheduleOutcome {
        appointments,
        failures,
        exact,
    }
}
