//! Turns the label-delimited recommendation text of the EMC workflow service
//! into systems → services, and drives the workflow for one patient.

pub mod access;
pub mod client;
pub mod error;
pub mod freq;
pub mod guidelines;
pub mod model;
pub mod parser;
pub mod patient;
pub mod render;
pub mod settings;
pub mod workflow;

pub use model::{Service, SystemEntry, Systems};
pub use parser::parse;
