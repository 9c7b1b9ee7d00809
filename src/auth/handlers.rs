use axum::{extract::State, routing::post, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{Credentials, Identifier, LoginRequest, SignupRequest},
        error::AuthError,
        password::hash_password,
    },
    rides::{NewRide, RepoError},
    state::AppState,
};

pub fn signup_routes() -> Router<AppState> {
    Router::new().route("/signup", post(signup))
}

/// Login is called straight from the mobile/web client, so any origin is allowed.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login)).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<Vec<String>>, AuthError> {
    // Name collisions are allowed; only email is unique.
    if state.rides.exists_by_email(&payload.email).await? {
        warn!(email = %payload.email, "email already registered");
        return Err(AuthError::EmailTaken);
    }

    let password_hash = hash_password(&payload.password).await?;

    let ride = state
        .rides
        .save(NewRide {
            name: payload.name,
            email: payload.email,
            password_hash,
            phone_number: payload.phone_number,
            gender: payload.gender,
        })
        .await
        .map_err(|e| {
            if matches!(e, RepoError::DuplicateEmail) {
                warn!("email registered concurrently");
            }
            e
        })?;

    info!(
        ride_id = ride.id,
        email = %ride.email,
        created_at = %ride.created_at,
        "rider registered"
    );
    Ok(Json(vec![
        "User registered successfully".to_string(),
        ride.id.to_string(),
    ]))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Vec<String>>, AuthError> {
    let Some(Credentials {
        identifier,
        password,
    }) = payload.credentials()
    else {
        warn!("login without credentials");
        return Err(AuthError::MissingCredentials);
    };

    let found = match &identifier {
        Identifier::Email(email) => {
            state
                .rides
                .find_by_email_and_password(email, &password)
                .await?
        }
        Identifier::Name(name) => state.rides.find_by_name_and_password(name, &password).await?,
    };

    let Some(ride) = found else {
        warn!(identifier = ?identifier, "login invalid credentials");
        return Err(AuthError::InvalidCredentials);
    };

    info!(ride_id = ride.id, "rider logged in");
    Ok(Json(vec!["Login successful".to_string(), ride.id.to_string()]))
}
