//! Command implementations.

pub mod claims;
pub mod classify;
pub mod interpret;
pub mod login;
pub mod users;

pub use self::claims::execute_claims;
pub use self::classify::execute_classify;
pub use self::interpret::execute_interpret;
pub use self::login::execute_login;
pub use self::users::execute_users;
