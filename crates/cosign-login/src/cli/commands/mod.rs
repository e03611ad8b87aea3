//! CLI commands

mod doctor;
mod login;
mod module;

pub use doctor::DoctorCommand;
pub use login::LoginCommand;
pub use module::ModuleCommand;
