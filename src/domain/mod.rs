// Domain layer - Workflow types and pure policies

pub mod errors;
pub mod model;
pub mod rules;
