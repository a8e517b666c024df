use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::dto::{ImageUpload, RegisterFields, RegisterRequest};
use crate::error::ApiError;

const PROFILE_IMAGE_FIELD: &str = "imagen_perfil";

fn content_type_is(headers: &HeaderMap, mime: &str) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().eq_ignore_ascii_case(mime))
        .unwrap_or(false)
}

/// Deserializes a JSON body when the request says `application/json`, otherwise an
/// urlencoded form.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if content_type_is(req.headers(), "application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
            Ok(Self(value))
        }
    }
}

/// Registration input. Multipart bodies carry the profile image; JSON and urlencoded bodies
/// are accepted too but can never include it.
pub struct RegisterForm(pub RegisterRequest);

#[async_trait]
impl<S> FromRequest<S> for RegisterForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !content_type_is(req.headers(), "multipart/form-data") {
            let JsonOrForm(fields) = JsonOrForm::<RegisterFields>::from_request(req, state).await?;
            return Ok(Self(RegisterRequest {
                fields,
                image: None,
            }));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;

        let mut text = Map::new();
        let mut image = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if name == PROFILE_IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let body = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                // browsers send an empty part when no file was chosen
                if !file_name.is_empty() {
                    image = Some(ImageUpload { file_name, body });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                text.insert(name, Value::String(value));
            }
        }

        let fields: RegisterFields = serde_json::from_value(Value::Object(text))
            .map_err(|e| ApiError::BadRequest(format!("Invalid registration form: {e}")))?;
        Ok(Self(RegisterRequest { fields, image }))
    }
}
