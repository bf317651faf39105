//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, trace span)
//!     → handlers.rs (parse id, call the store)
//!     → response.rs (JSON body or {"error"} with status)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{ApiError, ErrorBody, MessageBody};
pub use routes::ROUTE_TABLE;
pub use server::{AppState, HttpServer};
