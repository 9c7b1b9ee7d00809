use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::auth::password::verify_password;
use crate::rides::repo_types::{NewRide, Ride};

pub type RepoResult<T> = Result<T, RepoError>;

/// Riders sharing a name that a name+password login will try, lowest id first.
/// Each candidate costs one Argon2 verification.
pub const MAX_NAME_CANDIDATES: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("email already exists")]
    DuplicateEmail,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Data access for rider accounts.
///
/// The credential lookups are provided on top of the single-field finders: the
/// store only holds Argon2 hashes, so matching a password means fetching by the
/// identifying field and verifying each candidate.
#[async_trait]
pub trait RideRepository: Send + Sync {
    async fn save(&self, ride: NewRide) -> RepoResult<Ride>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Ride>>;
    async fn find_all(&self) -> RepoResult<Vec<Ride>>;
    /// Overwrites every mutable column of the row with `ride.id`. `None` if no such row.
    async fn update(&self, ride: &Ride) -> RepoResult<Option<Ride>>;
    async fn delete_by_id(&self, id: i64) -> RepoResult<bool>;
    async fn count(&self) -> RepoResult<i64>;

    async fn exists_by_email(&self, email: &str) -> RepoResult<bool>;
    async fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Ride>>;
    /// Lowest id wins when several riders share a name.
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Ride>>;
    async fn find_all_by_name(&self, name: &str) -> RepoResult<Vec<Ride>>;

    async fn find_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> RepoResult<Option<Ride>> {
        let Some(ride) = self.find_by_email(email).await? else {
            return Ok(None);
        };
        if verify_password(password, &ride.password_hash).await? {
            Ok(Some(ride))
        } else {
            Ok(None)
        }
    }

    async fn find_by_name_and_password(
        &self,
        name: &str,
        password: &str,
    ) -> RepoResult<Option<Ride>> {
        let candidates = self.find_all_by_name(name).await?;
        if candidates.len() > MAX_NAME_CANDIDATES {
            warn!(
                name,
                riders = candidates.len(),
                "name shared by more riders than are checked on login"
            );
        }
        for ride in candidates.into_iter().take(MAX_NAME_CANDIDATES) {
            if verify_password(password, &ride.password_hash).await? {
                return Ok(Some(ride));
            }
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct PgRideRepository {
    db: PgPool,
}

impl PgRideRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn map_write_err(e: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() && db.constraint() == Some("rides_email_key") {
            return RepoError::DuplicateEmail;
        }
    }
    RepoError::Database(e)
}

#[async_trait]
impl RideRepository for PgRideRepository {
    async fn save(&self, ride: NewRide) -> RepoResult<Ride> {
        let saved = sqlx::query_as::<_, Ride>(
            r#"
            INSERT INTO rides (name, email, password_hash, phone_number, gender)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, phone_number, gender, created_at
            "#,
        )
        .bind(&ride.name)
        .bind(&ride.email)
        .bind(&ride.password_hash)
        .bind(&ride.phone_number)
        .bind(&ride.gender)
        .fetch_one(&self.db)
        .await
        .map_err(map_write_err)?;
        debug!(ride_id = saved.id, "ride row inserted");
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            SELECT id, name, email, password_hash, phone_number, gender, created_at
            FROM rides
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(ride)
    }

    async fn find_all(&self) -> RepoResult<Vec<Ride>> {
        let rows = sqlx::query_as::<_, Ride>(
            r#"
            SELECT id, name, email, password_hash, phone_number, gender, created_at
            FROM rides
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update(&self, ride: &Ride) -> RepoResult<Option<Ride>> {
        let updated = sqlx::query_as::<_, Ride>(
            r#"
            UPDATE rides
            SET name = $2, email = $3, password_hash = $4, phone_number = $5, gender = $6
            WHERE id = $1
            RETURNING id, name, email, password_hash, phone_number, gender, created_at
            "#,
        )
        .bind(ride.id)
        .bind(&ride.name)
        .bind(&ride.email)
        .bind(&ride.password_hash)
        .bind(&ride.phone_number)
        .bind(&ride.gender)
        .fetch_optional(&self.db)
        .await
        .map_err(map_write_err)?;
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM rides WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RepoResult<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rides")
            .fetch_one(&self.db)
            .await?;
        Ok(n)
    }

    async fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rides WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.db)
                .await?;
        Ok(exists)
    }

    async fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rides WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.db)
                .await?;
        Ok(exists)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            SELECT id, name, email, password_hash, phone_number, gender, created_at
            FROM rides
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(ride)
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Ride>> {
        let ride = sqlx::query_as::<_, Ride>(
            r#"
            SELECT id, name, email, password_hash, phone_number, gender, created_at
            FROM rides
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;
        Ok(ride)
    }

    async fn find_all_by_name(&self, name: &str) -> RepoResult<Vec<Ride>> {
        let rows = sqlx::query_as::<_, Ride>(
            r#"
            SELECT id, name, email, password_hash, phone_number, gender, created_at
            FROM rides
            WHERE name = $1
            ORDER BY id
            "#,
        )
        .bind(name)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
