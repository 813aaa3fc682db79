pub mod bands;
pub mod context;
pub mod gate;
pub mod handlers;
pub mod intake;
pub mod models;
