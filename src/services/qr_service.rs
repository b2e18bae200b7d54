use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Duration, Utc};
use qrcode::render::svg;
use qrcode::QrCode;
use rand::prelude::*;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::mobile::MobileError;

/// Lifetime of the long-lived mobile access token, in seconds (30 days)
const ACCESS_TOKEN_LIFETIME_SECS: i64 = 86_400 * 30;

struct QrSession {
    expires_at: DateTime<Utc>,
    used: bool,
}

/// A freshly generated pairing token with its QR rendering
pub struct PairingToken {
    pub token: String,
    pub qr_code_base64: String,
    pub expires_at: DateTime<Utc>,
}

/// The opaque access token handed out after a successful exchange
pub struct AccessGrant {
    pub access_token: String,
    pub expires_in: i64,
}

/// In-process QR pairing session store
///
/// Sessions live only in this process. Tokens are single-use and expire after
/// ten minutes; expired entries are purged lazily on access.
pub struct QrPairingService {
    sessions: Mutex<HashMap<String, QrSession>>,
    ttl: Duration,
}

impl QrPairingService {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(10))
    }

    /// Create a service with a custom session lifetime
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Generate a new pairing token and its QR code
    ///
    /// The QR payload is `smartlighting://auth?token=<token>`, rendered as an
    /// SVG and base64-encoded for embedding in the JSON response.
    pub fn generate(&self) -> Result<PairingToken, MobileError> {
        let token = random_token(32);
        let expires_at = Utc::now() + self.ttl;

        let payload = format!("smartlighting://auth?token={}", token);
        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| MobileError::internal(format!("Failed to build QR code: {}", e)))?;
        let rendered = code
            .render::<svg::Color>()
            .min_dimensions(240, 240)
            .build();
        let qr_code_base64 = general_purpose::STANDARD.encode(rendered.as_bytes());

        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| MobileError::internal("QR session store poisoned".to_string()))?;
        let now = Utc::now();
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            token.clone(),
            QrSession {
                expires_at,
                used: false,
            },
        );

        Ok(PairingToken {
            token,
            qr_code_base64,
            expires_at,
        })
    }

    /// Exchange a pairing token for a long-lived access token
    ///
    /// A token validates exactly once. Expired tokens are removed on the spot;
    /// a second validation fails as already used.
    pub fn validate(&self, token: &str) -> Result<AccessGrant, MobileError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| MobileError::internal("QR session store poisoned".to_string()))?;

        let session = sessions.get_mut(token).ok_or_else(MobileError::token_not_found)?;

        if Utc::now() > session.expires_at {
            sessions.remove(token);
            return Err(MobileError::token_expired());
        }

        if session.used {
            return Err(MobileError::token_already_used());
        }

        session.used = true;

        Ok(AccessGrant {
            access_token: random_token(48),
            expires_in: ACCESS_TOKEN_LIFETIME_SECS,
        })
    }
}

impl Default for QrPairingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a url-safe random token of `bytes` random bytes
fn random_token(bytes: usize) -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..bytes).map(|_| rng.random()).collect();
    general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
}
