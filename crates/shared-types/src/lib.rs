pub mod config;
pub mod error;
pub mod events;
pub mod feature_flags;
pub mod models;
pub mod permissions;
pub mod requests;

pub use config::*;
pub use error::*;
pub use events::*;
pub use feature_flags::*;
pub use models::*;
pub use permissions::*;
pub use requests::*;
