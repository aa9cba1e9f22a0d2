pub mod endpoint;
pub mod ids;
pub mod outcome;
pub mod payload;
pub mod repository;

pub use endpoint::{Endpoint, EndpointKind, Endpoints, Timeout};
pub use ids::CallId;
pub use outcome::*;
pub use payload::{Payload, ResultRecord};
pub use repository::*;

/// Status code the service uses for every successful call.
pub const SUCCESS_STATUS: u16 = 200;
