// Application layer: the inbound HTTP surface.

pub mod routes;

pub use routes::router;
