use std::{fmt, str::FromStr};

use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::users::dto::text_or_number;

/// Store-assigned identifier of a user document. Rendered as 24 hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(ObjectId);

impl UserId {
    #[cfg(test)]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for UserId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = mongodb::bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// User document in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password: String, // hex SHA-256 digest
    #[serde(rename = "codigo_de_pais", default, deserialize_with = "text_or_number")]
    pub country_code: String,
    #[serde(rename = "imagen_perfil", default)]
    pub profile_image: String,
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

/// A user about to be inserted; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "codigo_de_pais")]
    pub country_code: String,
    #[serde(rename = "imagen_perfil")]
    pub profile_image: String,
    #[serde(rename = "nombres")]
    pub names: String,
    #[serde(rename = "apellidos")]
    pub surnames: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "edad")]
    pub age: String,
    #[serde(rename = "profesion")]
    pub profession: String,
}

#[cfg(test)]
impl NewUser {
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            email: self.email,
            username: self.username,
            password: self.password,
            country_code: self.country_code,
            profile_image: self.profile_image,
            names: self.names,
            surnames: self.surnames,
            phone: self.phone,
            age: self.age,
            profession: self.profession,
        }
    }
}

/// Field writes for one partial update. `None` leaves the stored value alone; the profile
/// fields are always written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_image: Option<String>,
    pub country_code: Option<String>,
    pub names: String,
    pub surnames: String,
    pub phone: String,
    pub age: String,
    pub profession: String,
}

impl UserChanges {
    /// Body of the `$set` operator.
    pub fn to_document(&self) -> Document {
        let mut set = doc! {
            "nombres": self.names.clone(),
            "apellidos": self.surnames.clone(),
            "telefono": self.phone.clone(),
            "edad": self.age.clone(),
            "profesion": self.profession.clone(),
        };
        let optional = [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
            ("imagen_perfil", &self.profile_image),
            ("codigo_de_pais", &self.country_code),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                set.insert(key, value.clone());
            }
        }
        set
    }

    #[cfg(test)]
    pub fn apply(self, user: &mut UserRecord) {
        if let Some(v) = self.username {
            user.username = v;
        }
        if let Some(v) = self.email {
            user.email = v;
        }
        if let Some(v) = self.password {
            user.password = v;
        }
        if let Some(v) = self.profile_image {
            user.profile_image = v;
        }
        if let Some(v) = self.country_code {
            user.country_code = v;
        }
        user.names = self.names;
        user.surnames = self.surnames;
        user.phone = self.phone;
        user.age = self.age;
        user.profession = self.profession;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_and_renders_hex() {
        let id: UserId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert!("not-an-id".parse::<UserId>().is_err());
    }

    #[test]
    fn changes_document_only_sets_present_fields() {
        let changes = UserChanges {
            username: Some("ana".into()),
            names: "Ana".into(),
            ..Default::default()
        };
        let set = changes.to_document();
        assert_eq!(set.get_str("username").unwrap(), "ana");
        assert_eq!(set.get_str("nombres").unwrap(), "Ana");
        assert_eq!(set.get_str("profesion").unwrap(), "");
        assert!(!set.contains_key("email"));
        assert!(!set.contains_key("password"));
        assert!(!set.contains_key("codigo_de_pais"));
    }

    #[test]
    fn record_uses_store_field_names() {
        let record = UserRecord {
            id: UserId::new(),
            email: "ana@example.com".into(),
            username: "ana".into(),
            password: "digest".into(),
            country_code: "57".into(),
            profile_image: "uploads/ana.jpg".into(),
            names: String::new(),
            surnames: String::new(),
            phone: String::new(),
            age: "30".into(),
            profession: String::new(),
        };
        let document = mongodb::bson::to_document(&record).unwrap();
        assert!(document.get_object_id("_id").is_ok());
        assert_eq!(document.get_str("codigo_de_pais").unwrap(), "57");
        assert_eq!(document.get_str("edad").unwrap(), "30");

        let back: UserRecord = mongodb::bson::from_document(document).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn record_reads_numeric_and_null_profile_fields() {
        let id = ObjectId::new();
        let document = doc! {
            "_id": id,
            "email": "ana@example.com",
            "username": "ana",
            "password": "digest",
            "codigo_de_pais": 57,
            "imagen_perfil": "uploads/ana.jpg",
            "nombres": mongodb::bson::Bson::Null,
            "telefono": 5550101_i64,
            "edad": 30,
            "profesion": "nurse",
        };
        let record: UserRecord = mongodb::bson::from_document(document).unwrap();
        assert_eq!(record.id, UserId::from(id));
        assert_eq!(record.country_code, "57");
        assert_eq!(record.names, "");
        assert_eq!(record.surnames, "");
        assert_eq!(record.phone, "5550101");
        assert_eq!(record.age, "30");
    }
}
