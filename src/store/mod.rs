//! In-memory product store.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → payload DTO (product.rs: NewProduct / ProductPatch)
//!     → ProductStore (catalog.rs: one lock per read-modify-write)
//!     → Product snapshot or StoreError (error.rs)
//! ```
//!
//! # Design Decisions
//! - The collection is an ordered Vec; insertion order is the listing order
//! - Ids are parsed once at the boundary, compared exactly afterwards
//! - Handlers receive clones, never references into the locked collection

pub mod catalog;
pub mod error;
pub mod product;

pub use catalog::ProductStore;
pub use error::StoreError;
pub use product::{parse_product_id, NewProduct, Product, ProductId, ProductPatch};
