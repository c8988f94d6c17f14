pub mod error;

// Navigation core
pub mod navigation;
pub mod role;
pub mod router;

// Listing and CRUD state
pub mod crud;
pub mod listing;

pub mod common;
pub mod config;

// Backend resources
pub mod appointment;
pub mod equipment;
pub mod invoice;
pub mod leave;
pub mod maintenance;
pub mod observation;
pub mod patient;
pub mod prescription;
pub mod statistics;
pub mod user;

pub use error::*;

pub use navigation::*;
pub use role::*;
pub use router::*;

pub use crud::*;
pub use listing::*;

pub use common::*;
pub use config::*;

pub use appointment::*;
pub use equipment::*;
pub use invoice::*;
pub use leave::*;
pub use maintenance::*;
pub use observation::*;
pub use patient::*;
pub use prescription::*;
pub use statistics::*;
pub use user::*;
