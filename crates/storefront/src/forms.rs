//! Account, contact and quote form flows.
//!
//! Login and registration go to the backend; a returned token is stored and
//! the shopper is told the outcome with a blocking alert. Contact and quote
//! requests are acknowledged locally and never leave the device.

use infpro_core::Email;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{info, instrument};

use crate::api::{AuthResponse, StorefrontApi};
use crate::notify::Notifier;
use crate::preferences::Preferences;
use crate::storage::{KeyValueStore, StorageError};

pub const REGISTER_OK: &str = "Registration complete!";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGIN_OK: &str = "Logged in!";
pub const LOGIN_FAILED: &str = "Login failed";
pub const CONTACT_SENT: &str = "Message sent! Thanks for getting in touch.";
pub const QUOTE_SENT: &str = "Quote request sent! We will review it and reply by email.";

/// Registration form fields.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Login form fields.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Contact form fields.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Quote request form fields.
#[derive(Debug, Clone)]
pub struct QuoteForm {
    pub name: String,
    pub email: String,
    pub details: String,
}

/// What happened to a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Accepted; for login/register a token is now stored.
    Accepted,
    /// Refused, with the message shown to the shopper.
    Rejected(String),
}

impl FormOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Submits forms and reports the result through a [`Notifier`].
#[derive(Debug, Clone)]
pub struct FormSubmitter<S, N> {
    api: StorefrontApi,
    preferences: Preferences<S>,
    notifier: N,
}

impl<S: KeyValueStore, N: Notifier> FormSubmitter<S, N> {
    #[must_use]
    pub const fn new(api: StorefrontApi, preferences: Preferences<S>, notifier: N) -> Self {
        Self {
            api,
            preferences,
            notifier,
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the received token cannot be stored.
    #[instrument(skip_all)]
    pub async fn register(&self, form: &RegisterForm) -> Result<FormOutcome, StorageError> {
        let email = match Email::parse(&form.email) {
            Ok(email) => email,
            Err(e) => return Ok(self.reject(format!("Invalid email: {e}"))),
        };
        let response = self
            .api
            .register(&json!({
                "name": form.name.trim(),
                "email": email.as_str(),
                "password": form.password.expose_secret(),
            }))
            .await;
        self.finish_auth(response, REGISTER_OK, REGISTER_FAILED)
    }

    /// Log in to an existing account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the received token cannot be stored.
    #[instrument(skip_all)]
    pub async fn login(&self, form: &LoginForm) -> Result<FormOutcome, StorageError> {
        let email = match Email::parse(&form.email) {
            Ok(email) => email,
            Err(e) => return Ok(self.reject(format!("Invalid email: {e}"))),
        };
        let response = self
            .api
            .login(&json!({
                "email": email.as_str(),
                "password": form.password.expose_secret(),
            }))
            .await;
        self.finish_auth(response, LOGIN_OK, LOGIN_FAILED)
    }

    /// Forget the stored session token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the token cannot be removed.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.preferences.clear_token()
    }

    /// Acknowledge a contact message.
    #[must_use]
    pub fn contact(&self, form: &ContactForm) -> FormOutcome {
        if let Err(e) = Email::parse(&form.email) {
            return self.reject(format!("Invalid email: {e}"));
        }
        info!(chars = form.message.chars().count(), "Contact message acknowledged");
        self.notifier.alert(CONTACT_SENT);
        FormOutcome::Accepted
    }

    /// Acknowledge a quote request.
    #[must_use]
    pub fn quote(&self, form: &QuoteForm) -> FormOutcome {
        if let Err(e) = Email::parse(&form.email) {
            return self.reject(format!("Invalid email: {e}"));
        }
        info!(chars = form.details.chars().count(), "Quote request acknowledged");
        self.notifier.alert(QUOTE_SENT);
        FormOutcome::Accepted
    }

    fn finish_auth(
        &self,
        response: AuthResponse,
        success: &str,
        fallback: &str,
    ) -> Result<FormOutcome, StorageError> {
        match response.token {
            Some(token) => {
                self.preferences.set_token(&token)?;
                self.notifier.alert(success);
                Ok(FormOutcome::Accepted)
            }
            None => Ok(self.reject(response.error.unwrap_or_else(|| fallback.to_owned()))),
        }
    }

    fn reject(&self, message: String) -> FormOutcome {
        self.notifier.alert(&message);
        FormOutcome::Rejected(message)
    }
}
