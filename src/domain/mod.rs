pub mod error;

// Contact-list cleaning module
pub mod contacts;
