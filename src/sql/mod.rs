pub mod builder;
pub mod params;

pub use builder::*;
pub use params::PgBindValue;
