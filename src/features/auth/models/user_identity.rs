use sqlx::FromRow;

use crate::features::auth::dtos::UserIdentityDto;

/// Database model for a reviewer. Rows are provisioned outside this
/// service; the password column is only ever used in the WHERE clause.
#[derive(Debug, Clone, FromRow)]
pub struct UserIdentity {
    pub email: String,
    pub batch_number: i32,
}

impl From<UserIdentity> for UserIdentityDto {
    fn from(u: UserIdentity) -> Self {
        Self {
            email: u.email,
            batch_number: u.batch_number,
        }
    }
}
