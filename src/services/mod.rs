//! Scheduling and routing services

pub mod auto_schedule;
pub mod optimizer;
pub mod route_model;
pub mod time_math;
pub mod travel_time;
