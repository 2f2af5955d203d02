//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores that persist a whole collection as
//! one JSON document.

pub mod json_file_store;
