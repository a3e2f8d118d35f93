//! Scheduling session state
//!
//! One explicit value holds everything the calendar screen works from: the
//! day's appointments, the last optimization suggestion, and a generation
//! token. Computations capture the generation when they start; a result is
//! applied only while its generation is still current, so switching days
//! mid-flight discards the stale result instead of rendering it.

use chrono::NaiveDate;

use super::{Appointment, RouteOptimizationResult, Stop};

/// Monotonic token identifying one "version" of the session's day view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Per-day scheduling state owned by the UI layer.
#[derive(Debug, Clone)]
pub struct SchedulingSession {
    date: NaiveDate,
    appointments: Vec<Appointment>,
    suggestion: Option<RouteOptimizationResult>,
    generation: u64,
}

impl SchedulingSession {
    pub fn new(date: NaiveDate, appointments: Vec<Appointment>) -> Self {
        Self {
            date,
            appointments,
            suggestion: None,
            generation: 0,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Routing projection of the current appointments, in display order.
    pub fn stops(&self) -> Vec<Stop> {
        self.appointments.iter().map(Stop::from_appointment).collect()
    }

    /// Generation captured by a computation that is about to start.
    pub fn current_generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.generation
    }

    /// Replace the day's appointment set. Invalidates in-flight computations
    /// and any displayed suggestion.
    pub fn replace_day(&mut self, date: NaiveDate, appointments: Vec<Appointment>) {
        self.date = date;
        self.appointments = appointments;
        self.suggestion = None;
        self.generation += 1;
    }

    /// Apply a finished optimization evaluation. Returns false (and drops
    /// the result) when a newer day view superseded the computation.
    pub fn accept_suggestion(
        &mut self,
        generation: Generation,
        result: RouteOptimizationResult,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.suggestion = Some(result);
        true
    }

    pub fn suggestion(&self) -> Option<&RouteOptimizationResult> {
        self.suggestion.as_ref()
    }

    pub fn dismiss_suggestion(&mut self) {
        self.suggestion = None;
    }

    /// Overwrite appointments after a reschedule succeeded (same day).
    pub fn apply_rescheduled(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
        self.suggestion = None;
        self.generation += 1;
    }
}
