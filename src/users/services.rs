use crate::{
    auth::password::hash_password,
    countries::CountryCodes,
    users::{
        dto::UpdateUserRequest,
        repo_types::{UserChanges, UserRecord},
    },
    validation::{allowed_upload, valid_email, valid_password, ValidationError},
};

/// Turns an update request into the writes for `existing`, checking fields in the order
/// username, email, password, image, country code. Profile fields missing from the request are
/// rewritten with the stored value.
pub fn changes_for(
    request: UpdateUserRequest,
    existing: &UserRecord,
    countries: &CountryCodes,
) -> Result<UserChanges, ValidationError> {
    if let Some(email) = &request.email {
        if !valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
    }

    let password = match request.password {
        Some(plain) if !valid_password(&plain) => return Err(ValidationError::WeakPassword),
        Some(plain) => Some(hash_password(&plain)),
        None => None,
    };

    if let Some(path) = &request.profile_image {
        if !allowed_upload(path) {
            return Err(ValidationError::ProfileImagePath);
        }
    }

    if let Some(code) = &request.country_code {
        if !code.is_empty() && !countries.contains(code) {
            return Err(ValidationError::UnknownCountryCode);
        }
    }

    Ok(UserChanges {
        username: request.username,
        email: request.email,
        password,
        profile_image: request.profile_image,
        country_code: request.country_code,
        names: request.names.unwrap_or_else(|| existing.names.clone()),
        surnames: request.surnames.unwrap_or_else(|| existing.surnames.clone()),
        phone: request.phone.unwrap_or_else(|| existing.phone.clone()),
        age: request.age.unwrap_or_else(|| existing.age.clone()),
        profession: request.profession.unwrap_or_else(|| existing.profession.clone()),
    })
}
