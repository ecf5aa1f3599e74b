mod handlers;
pub mod router;

pub use router::health_routes;
