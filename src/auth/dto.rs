use serde::{Deserialize, Serialize};

/// Request body for doctor registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub username: String,
    pub password: String,
}

/// Request body for doctor login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub doctor: PublicDoctor,
}

/// Public part of a doctor record returned to clients.
#[derive(Debug, Serialize)]
pub struct PublicDoctor {
    pub id: i64,
    pub name: String,
    pub username: String,
}
