pub mod appointment;
pub mod token;
