pub mod coords;
pub mod error;
pub mod value;
