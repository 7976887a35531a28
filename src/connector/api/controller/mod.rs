pub mod explain_controller;
pub mod health_controller;

pub use explain_controller::explain;
pub use health_controller::health;
