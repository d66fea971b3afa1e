use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicDoctor, RegisterRequest},
        jwt::JwtKeys,
        password::hash_password,
        repo::{Doctor, RegisterError},
    },
    db::AppState,
};

pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/doctors/register", post(register))
        .route("/doctors/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicDoctor>), (StatusCode, String)> {
    if payload.name.is_empty()
        || payload.phone.is_empty()
        || payload.username.is_empty()
        || payload.password.is_empty()
    {
        warn!("registration with empty field");
        return Err((StatusCode::BAD_REQUEST, "Fill all fields".into()));
    }

    let hash = hash_password(&payload.password);

    // No uniqueness pre-check: the UNIQUE constraint on username decides.
    let doctor = match Doctor::create(
        &state.db,
        &payload.name,
        &payload.phone,
        &payload.username,
        &hash,
    )
    .await
    {
        Ok(d) => d,
        Err(RegisterError::UsernameTaken) => {
            warn!(username = %payload.username, "username already exists");
            return Err((StatusCode::CONFLICT, "Username already exists".into()));
        }
        Err(RegisterError::Db(e)) => {
            error!(error = %e, "create doctor failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    info!(doctor_id = %doctor.id, username = %doctor.username, "doctor registered");
    Ok((
        StatusCode::CREATED,
        Json(PublicDoctor {
            id: doctor.id,
            name: doctor.name,
            username: doctor.username,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let doctor = match Doctor::verify(&state.db, &payload.username, &payload.password).await {
        Ok(Some(d)) => d,
        Ok(None) => {
            warn!(username = %payload.username, "invalid login");
            return Err((StatusCode::UNAUTHORIZED, "Invalid login".into()));
        }
        Err(e) => {
            error!(error = %e, "credential lookup failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let access_token = match keys.sign(doctor.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "jwt sign failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    info!(doctor_id = %doctor.id, "doctor logged in");
    Ok(Json(AuthResponse {
        access_token,
        doctor: PublicDoctor {
            id: doctor.id,
            name: doctor.name,
            username: doctor.username,
        },
    }))
}
