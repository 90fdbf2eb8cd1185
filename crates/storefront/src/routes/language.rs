//! Language switcher route handler.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use cafe_artesano_core::Locale;

use crate::error::Result;
use crate::middleware::Shopper;
use crate::routes::{FormInput, safe_return_to};

/// Language form data.
#[derive(Debug, Deserialize)]
pub struct LanguageForm {
    pub locale: String,
    pub return_to: Option<String>,
}

/// Switch the UI language. Unsupported codes select English.
#[instrument(skip(shopper))]
pub async fn switch(shopper: Shopper, form: FormInput<LanguageForm>) -> Result<Redirect> {
    let Form(form) = form?;
    let locale = form.locale.parse::<Locale>().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Falling back to default locale");
        Locale::default()
    });
    shopper.set_locale(locale).await?;

    Ok(Redirect::to(&safe_return_to(form.return_to.as_deref(), "/")))
}
