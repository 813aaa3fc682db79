pub mod handlers;
pub mod script;
pub mod simulator;
