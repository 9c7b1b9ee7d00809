use sqlx::FromRow;
use time::OffsetDateTime;

/// Rider account row in the `rides` table.
#[derive(Debug, Clone, FromRow)]
pub struct Ride {
    pub id: i64,                      // assigned by the store, never changes
    pub name: String,                 // not unique
    pub email: String,                // unique index
    pub password_hash: String,        // Argon2 PHC string
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Insert shape for a new rider.
#[derive(Debug, Clone)]
pub struct NewRide {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
}
