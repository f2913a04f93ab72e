//! Sign-in flow: a locally generated captcha gate in front of the login
//! endpoint, storing the returned session in the shared store on success.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::api::{ApiClient, ApiError, Session};

const CAPTCHA_LENGTH: usize = 6;
const CAPTCHA_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Challenge text shown to the user before sign-in. Purely client-side:
/// it exists to slow down scripted credential entry, not to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    text: String,
}

impl Captcha {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let text = (0..CAPTCHA_LENGTH)
            .map(|_| CAPTCHA_ALPHABET[rng.gen_range(0..CAPTCHA_ALPHABET.len())] as char)
            .collect();
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn matches(&self, answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub user_name_or_email: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("captcha answer did not match")]
    CaptchaMismatch,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives the login surface. Every failed attempt (wrong captcha, rejected
/// credentials, transport failure) regenerates the captcha.
pub struct LoginFlow {
    client: Arc<ApiClient>,
    captcha: Captcha,
}

impl LoginFlow {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            captcha: Captcha::generate(),
        }
    }

    pub fn captcha(&self) -> &Captcha {
        &self.captcha
    }

    pub fn refresh_captcha(&mut self) {
        self.captcha = Captcha::generate();
    }

    /// A wrong captcha answer blocks the attempt before any request is
    /// issued. On success the full session (token, refresh token, user
    /// identity) is stored and subscribers are notified.
    pub async fn sign_in(
        &mut self,
        credentials: &LoginCredentials,
        captcha_answer: &str,
    ) -> Result<Session, LoginError> {
        if !self.captcha.matches(captcha_answer) {
            self.refresh_captcha();
            return Err(LoginError::CaptchaMismatch);
        }

        match self
            .client
            .login(&credentials.user_name_or_email, &credentials.password)
            .await
        {
            Ok(session) => {
                self.client.session().set(session.clone());
                info!(user = %session.user_name, "signed in");
                Ok(session)
            }
            Err(error) => {
                self.refresh_captcha();
                Err(LoginError::Api(error))
            }
        }
    }
}
