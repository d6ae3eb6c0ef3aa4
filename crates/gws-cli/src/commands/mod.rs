//! Command implementations for gws-cli

pub mod clone;
pub mod doctor;
pub mod fix;
pub mod init;
pub mod list;
pub mod remove;
pub mod rotate;
pub mod status;

pub use clone::run_clone;
pub use doctor::run_doctor;
pub use fix::{FixFlags, run_fix};
pub use init::{InitArgs, run_init};
pub use list::run_list;
pub use remove::run_remove;
pub use rotate::run_rotate;
pub use status::run_status;
