pub mod color;
pub mod command;
pub mod config;
pub mod globe;
pub mod surface;

pub use color::*;
pub use command::*;
pub use config::*;
pub use globe::*;
pub use surface::*;
