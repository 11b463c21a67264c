pub mod match_request;
pub mod match_result;

pub use match_request::{MatchRequest, ResumeFile};
pub use match_result::{HealthStatus, MatchResult};
