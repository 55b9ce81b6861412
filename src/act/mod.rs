pub mod orchestrator;
pub mod section;
