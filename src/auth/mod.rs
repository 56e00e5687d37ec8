pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use policy::{authorize, Action, Actor, Decision, Target};
pub use utils::{current_actor, current_user, extract_claims_from_context};
