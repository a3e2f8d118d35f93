//! Route optimization.
//!
//! Greedy nearest-neighbor ordering from the base location, plus an
//! advisory evaluation that compares the current visiting order against
//! the optimized one. Suitable for a single groomer's day (≤ ~20 stops);
//! O(n²) provider calls.

use tracing::{debug, info};

use crate::defaults::OPTIMIZE_THRESHOLD_MINUTES;
use crate::services::route_model::build_route;
use crate::services::travel_time::TravelTimeProvider;
use crate::types::{Route, RouteOptimizationResult, Stop};

/// Compute a nearest-neighbor visiting order anchored at the base.
///
/// Starting from `base_location`, repeatedly pick the unvisited stop with
/// the smallest estimated travel time from the current location. Ties keep
/// input order (the scan is stable). Stops without an address are excluded
/// from the candidate set and re-appended at their original relative order
/// after the routable ones. Returns the new order and its total anchored
/// travel minutes (including the return to base).
pub async fn optimize(
    stops: &[Stop],
    base_location: &str,
    provider: &dyn TravelTimeProvider,
) -> (Vec<Stop>, i32) {
    let routable: Vec<&Stop> = stops.iter().filter(|s| s.has_address()).collect();
    let n = routable.len();

    let mut ordered: Vec<Stop> = Vec::with_capacity(stops.len());
    let mut visited = vec![false; n];
    let mut total_travel_minutes = 0;
    let mut current_address = base_location.to_string();

    for _ in 0..n {
        let mut best: Option<(usize, i32)> = None;

        for (i, stop) in routable.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let address = stop.address.as_deref().unwrap_or_default();
            let minutes = provider.estimate(&current_address, address).await;

            // Strictly-less keeps ties on the earlier input index.
            if best.map(|(_, m)| minutes < m).unwrap_or(true) {
                best = Some((i, minutes));
            }
        }

        let (next, minutes) = match best {
            Some(found) => found,
            None => break,
        };

        visited[next] = true;
        total_travel_minutes += minutes;
        current_address = routable[next].address.clone().unwrap_or_default();
        ordered.push(routable[next].clone());
    }

    if n > 0 {
        total_travel_minutes += provider.estimate(&current_address, base_location).await;
    }

    // Address-less stops ride along at the end, in their original order.
    ordered.extend(stops.iter().filter(|s| !s.has_address()).cloned());

    debug!(
        "Nearest-neighbor order computed: {} routable stops, {} travel minutes",
        n, total_travel_minutes
    );

    (ordered, total_travel_minutes)
}

/// Evaluate whether re-ordering the current route is worthwhile.
///
/// Both totals are anchored (base to base). Advisory only: stored
/// appointment times are never touched here. Reported savings are clamped
/// to zero so a negative "saving" is never surfaced.
pub async fn evaluate(
    current_stops: &[Stop],
    base_location: &str,
    provider: &dyn TravelTimeProvider,
) -> RouteOptimizationResult {
    let original_route = build_route(current_stops, base_location, provider).await;

    let (optimized_stops, _) = optimize(current_stops, base_location, provider).await;
    let optimized_route = build_route(&optimized_stops, base_location, provider).await;

    let saved_minutes = original_route.total_travel_minutes - optimized_route.total_travel_minutes;
    let available = saved_minutes > OPTIMIZE_THRESHOLD_MINUTES;

    let time_saved_minutes = saved_minutes.max(0);
    let distance_saved_miles =
        (original_route.total_distance_miles - optimized_route.total_distance_miles).max(0.0);

    if available {
        info!(
            "Route optimization available: saves {} minutes ({:.1} miles)",
            time_saved_minutes, distance_saved_miles
        );
    }

    RouteOptimizationResult {
        available,
        is_optimal: !available,
        original_route,
        optimized_route,
        time_saved_minutes,
        distance_saved_miles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::travel_time::testing::FixedTravelTimes;
    use uuid::Uuid;

    const BASE: &str = "L";

    fn stop(address: &str) -> Stop {
        Stop {
            appointment_id: Uuid::new_v4(),
            client_name: format!("client {address}"),
            address: Some(address.to_string()),
            estimated_duration_minutes: 60,
        }
    }

    fn no_address_stop() -> Stop {
        Stop {
            appointment_id: Uuid::new_v4(),
            client_name: "no address".to_string(),
            address: None,
            estimated_duration_minutes: 60,
        }
    }

    /// Stub matrix from the calendar's reference scenario; symmetric where
    /// unspecified.
    fn scenario_provider() -> FixedTravelTimes {
        FixedTravelTimes::new(&[
            (BASE, "A", 10),
            ("A", "B", 5),
            ("B", "C", 40),
            (BASE, "B", 8),
            ("B", "A", 5),
            ("A", "C", 20),
            (BASE, "C", 25),
            ("C", BASE, 15),
        ])
    }

    #[tokio::test]
    async fn nearest_neighbor_prefers_closest_first() {
        let provider = scenario_provider();
        let stops = vec![stop("A"), stop("B"), stop("C")];

        let (ordered, total) = optimize(&stops, BASE, &provider).await;

        let addresses: Vec<&str> =
            ordered.iter().map(|s| s.address.as_deref().unwrap()).collect();
        // L->B (8) beats L->A (10) and L->C (25); then B->A (5); then A->C (20).
        assert_eq!(addresses, vec!["B", "A", "C"]);
        // 8 + 5 + 20 + C->L (15) = 48 anchored minutes.
        assert_eq!(total, 48);
    }

    #[tokio::test]
    async fn ties_keep_input_order() {
        let provider = FixedTravelTimes::new(&[
            (BASE, "X", 10),
            (BASE, "Y", 10),
            ("X", "Y", 5),
            ("Y", BASE, 10),
        ]);
        let stops = vec![stop("X"), stop("Y")];

        let (ordered, _) = optimize(&stops, BASE, &provider).await;
        let addresses: Vec<&str> =
            ordered.iter().map(|s| s.address.as_deref().unwrap()).collect();
        assert_eq!(addresses, vec!["X", "Y"]);
    }

    #[tokio::test]
    async fn address_less_stops_excluded_from_candidates() {
        let provider = scenario_provider();
        let stops = vec![stop("A"), no_address_stop(), stop("B")];

        let (ordered, _) = optimize(&stops, BASE, &provider).await;

        assert_eq!(ordered.len(), 3);
        assert_eq!(ordered[0].address.as_deref(), Some("B"));
        assert_eq!(ordered[1].address.as_deref(), Some("A"));
        assert!(ordered[2].address.is_none());
    }

    #[tokio::test]
    async fn empty_input_yields_empty_order() {
        let provider = FixedTravelTimes::new(&[]);
        let (ordered, total) = optimize(&[], BASE, &provider).await;
        assert!(ordered.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn evaluate_flags_worthwhile_reorder() {
        let provider = scenario_provider();
        let stops = vec![stop("A"), stop("B"), stop("C")];

        let result = evaluate(&stops, BASE, &provider).await;

        // Original A,B,C: 10 + 5 + 40 + 15 = 70. Optimized: 48. Saves 22.
        assert_eq!(result.original_route.total_travel_minutes, 70);
        assert_eq!(result.optimized_route.total_travel_minutes, 48);
        assert!(result.available);
        assert!(!result.is_optimal);
        assert_eq!(result.time_saved_minutes, 22);
        assert!(result.distance_saved_miles > 0.0);
    }

    #[tokio::test]
    async fn evaluate_within_threshold_is_optimal() {
        // Already in nearest-neighbor order: nothing to save.
        let provider = scenario_provider();
        let stops = vec![stop("B"), stop("A"), stop("C")];

        let result = evaluate(&stops, BASE, &provider).await;

        assert!(!result.available);
        assert!(result.is_optimal);
        assert_eq!(result.time_saved_minutes, 0);
        assert_eq!(result.distance_saved_miles, 0.0);
    }

    #[tokio::test]
    async fn evaluate_never_reports_negative_savings() {
        // Nearest-neighbor greed can lose to the input order: the cheap
        // first hop leads somewhere expensive.
        let provider = FixedTravelTimes::new(&[
            (BASE, "P", 6),
            (BASE, "Q", 7),
            ("P", "Q", 50),
            ("Q", "P", 50),
            ("P", BASE, 6),
            ("Q", BASE, 7),
            (BASE, "R", 30),
            ("P", "R", 50),
            ("Q", "R", 2),
            ("R", BASE, 30),
        ]);
        let stops = vec![stop("Q"), stop("R"), stop("P")];

        let result = evaluate(&stops, BASE, &provider).await;

        assert!(result.time_saved_minutes >= 0);
        assert!(result.distance_saved_miles >= 0.0);
    }
}
