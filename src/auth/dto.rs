use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::users::dto::text_or_number;

/// Text fields of a registration, whatever encoding they arrived in.
#[derive(Debug, Deserialize)]
pub struct RegisterFields {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(rename = "codigo_de_pais", default, deserialize_with = "text_or_number")]
    pub country_code: String,
    #[serde(rename = "nombres", default, deserialize_with = "text_or_number")]
    pub names: String,
    #[serde(rename = "apellidos", default, deserialize_with = "text_or_number")]
    pub surnames: String,
    #[serde(rename = "telefono", default, deserialize_with = "text_or_number")]
    pub phone: String,
    #[serde(rename = "edad", default, deserialize_with = "text_or_number")]
    pub age: String,
    #[serde(rename = "profesion", default, deserialize_with = "text_or_number")]
    pub profession: String,
}

/// The `imagen_perfil` file part.
#[derive(Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub body: Bytes,
}

#[derive(Debug)]
pub struct RegisterRequest {
    pub fields: RegisterFields,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}
