pub mod admission;
pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod locker;
pub mod models;
pub mod state;
pub mod token;
pub mod transport;

pub use admission::{AdmissionController, RequestContext, TokenCookie};
pub use config::Config;
pub use error::{Result, RoomQError};
pub use state::AppState;
