pub mod clock;
pub mod config;
pub mod db;
pub mod health;
pub mod lifecycle;
pub mod models;
pub mod repo;
pub mod routes;
pub mod service;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use routes::{subscriptions_router, AppState};
pub use service::{ServiceError, SubscriptionService};
