//! Account and message forms.
//!
//! Outcomes are shown by the console notifier; a refused form also makes
//! the command exit non-zero.

use infpro_storefront::forms::{ContactForm, LoginForm, QuoteForm, RegisterForm};
use infpro_storefront::{FormOutcome, StorefrontError};
use secrecy::SecretString;

use super::Context;

fn check(outcome: FormOutcome) -> infpro_storefront::Result<()> {
    match outcome {
        FormOutcome::Accepted => Ok(()),
        FormOutcome::Rejected(message) => Err(StorefrontError::Rejected(message)),
    }
}

/// # Errors
///
/// Returns `Rejected` if the backend refused the registration.
pub async fn register(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
) -> infpro_storefront::Result<()> {
    let form = RegisterForm {
        name,
        email,
        password: SecretString::from(password),
    };
    check(ctx.forms().register(&form).await?)
}

/// # Errors
///
/// Returns `Rejected` if the backend refused the login.
pub async fn login(ctx: &Context, email: String, password: String) -> infpro_storefront::Result<()> {
    let form = LoginForm {
        email,
        password: SecretString::from(password),
    };
    check(ctx.forms().login(&form).await?)
}

/// # Errors
///
/// Returns a storage error if the token cannot be removed.
pub fn logout(ctx: &Context) -> infpro_storefront::Result<()> {
    ctx.forms().logout()?;
    tracing::info!("Session token cleared");
    Ok(())
}

/// # Errors
///
/// Returns `Rejected` if the email is not valid.
pub fn contact(
    ctx: &Context,
    name: String,
    email: String,
    message: String,
) -> infpro_storefront::Result<()> {
    check(ctx.forms().contact(&ContactForm {
        name,
        email,
        message,
    }))
}

/// # Errors
///
/// Returns `Rejected` if the email is not valid.
pub fn quote(
    ctx: &Context,
    name: String,
    email: String,
    details: String,
) -> infpro_storefront::Result<()> {
    check(ctx.forms().quote(&QuoteForm {
        name,
        email,
        details,
    }))
}
