pub mod constants;
pub mod config;
pub mod track;
pub mod track_query;
pub mod vehicle;
pub mod physics;
pub mod lap_system;

pub use constants::*;
pub use config::*;
pub use track::*;
pub use track_query::*;
pub use vehicle::*;
pub use physics::*;
pub use lap_system::*;
