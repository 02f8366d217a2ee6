mod user_identity;

pub use user_identity::UserIdentity;
