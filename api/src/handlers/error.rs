use std::fmt;

use actix_web::{
    http::{header, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use rt_core::errors::{extract_english_message, extract_indonesian_message, AuthError, TokenError};
use rt_shared::errors::{error_codes, ErrorResponse};

/// Message returned for every rejected token. The concrete reason is logged only.
const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token | Token tidak valid atau kedaluwarsa";

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred | Terjadi kesalahan internal";

/// Language preference for response messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Indonesian,
}

impl Language {
    /// Detect language preference from Accept-Language header
    pub fn from_request(req: &HttpRequest) -> Self {
        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Self::from_header_value)
            .unwrap_or(Language::English)
    }

    /// Parse an Accept-Language value such as `"id-ID,id;q=0.9,en;q=0.8"`
    pub fn from_header_value(value: &str) -> Self {
        let mut preferred = Language::English;
        let mut max_quality = 0.0_f32;

        for entry in value.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or_default().trim().to_lowercase();
            let quality = parts
                .next()
                .and_then(|q| q.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);

            let language = if tag == "id" || tag.starts_with("id-") {
                Language::Indonesian
            } else if tag.starts_with("en") {
                Language::English
            } else {
                continue;
            };

            if quality > max_quality {
                preferred = language;
                max_quality = quality;
            }
        }

        preferred
    }

    /// Pick the matching half of an `"English | Indonesian"` message
    pub fn select<'a>(&self, bilingual: &'a str) -> &'a str {
        match self {
            Language::English => extract_english_message(bilingual),
            Language::Indonesian => extract_indonesian_message(bilingual),
        }
    }
}

/// Error carried through actix as a JSON [`ErrorResponse`]
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    /// 401 for a token that failed validation, whatever the reason
    pub fn invalid_token(lang: Language) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::UNAUTHORIZED, lang.select(INVALID_TOKEN_MESSAGE)),
        )
    }

    pub fn internal(lang: Language) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(error_codes::INTERNAL_ERROR, lang.select(INTERNAL_ERROR_MESSAGE)),
        )
    }

    pub fn from_auth_error(error: &AuthError, lang: Language) -> Self {
        let status = match error {
            AuthError::MissingCredentials | AuthError::InvalidAuthorizationFormat => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        };
        let message = error.to_string();
        Self::new(status, ErrorResponse::new(error.code(), lang.select(&message)))
    }

    pub fn from_token_error(error: &TokenError, lang: Language) -> Self {
        match error {
            TokenError::SigningKey => Self::internal(lang),
            _ => Self::invalid_token(lang),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self::from_auth_error(&error, Language::English)
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        Self::from_token_error(&error, Language::English)
    }
}
