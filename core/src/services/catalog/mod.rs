//! Catalog service module: public product listing and merchant product creation

mod service;


pub use service::{CatalogService, NewProduct};
