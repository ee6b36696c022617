pub mod backend;
pub mod claims;
pub mod locker;
pub mod validation;

pub use backend::{BackendStatus, QueueAction, ServingResponse, TokenIdResponse};
pub use claims::{TokenClaims, TokenType};
pub use locker::{FindSessionsResponse, LockerItem, PutLockerRequest};
pub use validation::{Admission, Decision, ValidationResult};
