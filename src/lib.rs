//! GroomRoute scheduling core.
//!
//! The appointment-scheduling and route-optimization engine behind the
//! GroomRoute calendar: travel-time estimation (live distance matrix with a
//! deterministic offline fallback), nearest-neighbor route construction and
//! evaluation, sequential auto-scheduling, and the interactive time-grid
//! model (snap-to-grid, overlap-free drag/resize).
//!
//! Persistence, authentication, pricing and rendering are collaborators
//! owned by the host application; this crate reads appointments and
//! proposes time mutations through the [`persistence::AppointmentStore`]
//! seam.

pub mod config;
pub mod defaults;
pub mod grid;
pub mod interaction;
pub mod persistence;
pub mod services;
pub mod types;
