use axum::{
    extract::{DefaultBodyLimit, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, RegisterResponse},
        extractors::{JsonOrForm, RegisterForm},
        password::{hash_password, verify_password},
    },
    error::{ApiError, MessageBody},
    pages,
    state::AppState,
    users::repo_types::NewUser,
    validation::{allowed_upload, sanitize_filename, valid_email, valid_password, ValidationError},
};

pub fn auth_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/register", get(pages::register_page).post(register))
        .layer(DefaultBodyLimit::max(upload_limit))
        .route("/login", get(pages::login_page).post(login))
}

#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    RegisterForm(request): RegisterForm,
) -> Result<Json<RegisterResponse>, ApiError> {
    let RegisterRequest { fields, image } = request;

    if !valid_email(&fields.email) {
        warn!(email = %fields.email, "invalid email");
        return Err(ValidationError::InvalidEmail.into());
    }

    if !valid_password(&fields.password) {
        warn!(username = %fields.username, "weak password");
        return Err(ValidationError::WeakPassword.into());
    }

    if !fields.country_code.is_empty() && !state.countries.contains(&fields.country_code) {
        warn!(country_code = %fields.country_code, "unknown country code");
        return Err(ValidationError::UnknownCountryCode.into());
    }

    // the sanitized name must still carry an allowed extension
    let (file_name, body) = match image {
        Some(image) if allowed_upload(&image.file_name) => {
            match sanitize_filename(&image.file_name).filter(|n| allowed_upload(n)) {
                Some(name) => (name, image.body),
                None => {
                    warn!(file_name = %image.file_name, "profile image name unusable");
                    return Err(ValidationError::ProfileImageRejected.into());
                }
            }
        }
        Some(image) => {
            warn!(file_name = %image.file_name, "profile image type not allowed");
            return Err(ValidationError::ProfileImageRejected.into());
        }
        None => {
            warn!("profile image missing");
            return Err(ValidationError::ProfileImageRejected.into());
        }
    };

    let profile_image = state.storage.put_image(&file_name, body).await?;

    let user = NewUser {
        password: hash_password(&fields.password),
        email: fields.email,
        username: fields.username,
        country_code: fields.country_code,
        profile_image,
        names: fields.names,
        surnames: fields.surnames,
        phone: fields.phone,
        age: fields.age,
        profession: fields.profession,
    };
    let user_id = state.users.insert(user).await?;

    info!(%user_id, "user registered");
    Ok(Json(RegisterResponse {
        message: "User registered successfully".into(),
        user_id: user_id.to_string(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<LoginRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let login = payload.username_or_email;
    match state.users.find_by_login(&login).await? {
        Some(user) if verify_password(&payload.password, &user.password) => {
            info!(user_id = %user.id, "user logged in");
            Ok(Json(MessageBody::new("Login successful")))
        }
        Some(user) => {
            warn!(user_id = %user.id, "login invalid password");
            Err(ApiError::InvalidCredentials)
        }
        None => {
            warn!(%login, "login unknown user");
            Err(ApiError::InvalidCredentials)
        }
    }
}
