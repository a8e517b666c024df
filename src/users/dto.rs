use serde::{Deserialize, Deserializer, Serialize};

use crate::users::repo_types::UserRecord;

/// Profile fields arrive as strings from forms but sometimes as numbers from JSON clients
/// (`"edad": 30`), and older documents hold them in the same shapes. Both are read as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Int(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }
}

/// `null` reads as an empty string.
pub(crate) fn text_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    opt_text_or_number(d).map(Option::unwrap_or_default)
}

pub(crate) fn opt_text_or_number<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    Option::<TextOrNumber>::deserialize(d).map(|v| v.map(String::from))
}

/// PUT /users/{id}. Every field is optional; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(rename = "imagen_perfil", default)]
    pub profile_image: Option<String>,
    #[serde(rename = "codigo_de_pais", default, deserialize_with = "opt_text_or_number")]
    pub country_code: Option<String>,
    #[serde(rename = "nombres", default, deserialize_with = "opt_text_or_number")]
    pub names: Option<String>,
    #[serde(rename = "apellidos", default, deserialize_with = "opt_text_or_number")]
    pub surnames: Option<String>,
    #[serde(rename = "telefono", default, deserialize_with = "opt_text_or_number")]
    pub phone: Option<String>,
    #[serde(rename = "edad", default, deserialize_with = "opt_text_or_number")]
    pub age: Option<String>,
    #[serde(rename = "profesion", default, deserialize_with = "opt_text_or_number")]
    pub profession: Option<String>,
}

/// A stored user as the listing renders it: every field, `_id` as a hex string.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub codigo_de_pais: String,
    pub imagen_perfil: String,
    pub nombres: String,
    pub apellidos: String,
    pub telefono: String,
    pub edad: String,
    pub profesion: String,
}

impl From<UserRecord> for UserView {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email,
            username: u.username,
            password: u.password,
            codigo_de_pais: u.country_code,
            imagen_perfil: u.profile_image,
            nombres: u.names,
            apellidos: u.surnames,
            telefono: u.phone,
            edad: u.age,
            profesion: u.profession,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    pub message: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_accepts_numbers_for_profile_fields() {
        let req: UpdateUserRequest =
            serde_json::from_value(json!({ "edad": 30, "telefono": "555-0101" })).unwrap();
        assert_eq!(req.age.as_deref(), Some("30"));
        assert_eq!(req.phone.as_deref(), Some("555-0101"));
        assert!(req.username.is_none());
        assert!(req.names.is_none());
    }

    #[test]
    fn update_request_ignores_unknown_keys() {
        let req: UpdateUserRequest =
            serde_json::from_value(json!({ "username": "ana", "role": "admin" })).unwrap();
        assert_eq!(req.username.as_deref(), Some("ana"));
    }

    #[test]
    fn profile_fields_read_null_as_empty() {
        #[derive(Deserialize)]
        struct Profile {
            #[serde(default, deserialize_with = "text_or_number")]
            edad: String,
            #[serde(default, deserialize_with = "text_or_number")]
            nombres: String,
        }
        let p: Profile = serde_json::from_value(json!({ "edad": null, "nombres": 7 })).unwrap();
        assert_eq!(p.edad, "");
        assert_eq!(p.nombres, "7");
    }

    #[test]
    fn update_request_rejects_wrong_types() {
        let res = serde_json::from_value::<UpdateUserRequest>(json!({ "email": 5 }));
        assert!(res.is_err());
    }
}
