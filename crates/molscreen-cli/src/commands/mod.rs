pub mod activity;
pub mod descriptors;
pub mod models;
