//! Type definitions

pub mod appointment;
pub mod route;
pub mod session;

pub use appointment::*;
pub use route::*;
pub use session::*;
