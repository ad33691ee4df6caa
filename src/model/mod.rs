pub mod chaos;
pub mod coefs;
pub mod collection;
pub mod color;
pub mod flame;
pub mod palette;
pub mod post;
pub mod transform;
