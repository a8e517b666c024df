use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref PASSWORD_SPECIAL: Regex = Regex::new(r#"[!@#$%^&*(),.?":{}|<>-]"#).unwrap();
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
}

const ALLOWED_IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Rejections produced while checking user input. The display text is what the client sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password does not meet the requirements")]
    WeakPassword,
    #[error("Invalid country code")]
    UnknownCountryCode,
    #[error("Profile image is missing or is not a jpg/jpeg file")]
    ProfileImageRejected,
    #[error("Profile image must be a jpg or jpeg file")]
    ProfileImagePath,
}

pub fn valid_email(email: &str) -> bool {
    email.contains('@')
}

/// At least 8 characters with one special character, one uppercase letter and one digit.
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= 8
        && PASSWORD_SPECIAL.is_match(password)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Only `.jpg` / `.jpeg` uploads are accepted, in any letter case.
pub fn allowed_upload(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            ALLOWED_IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Reduces a client supplied file name to a flat ASCII name that is safe to join onto the
/// upload directory. Accented letters keep their base letter (`fóto` becomes `foto`).
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let flattened: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
