//! Newsletter subscription route handler.
//!
//! Subscribers are appended to the JSON list store. Every outcome, including
//! a storage failure, ends in a redirect back with a toast; the form never
//! shows a raw error page.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use cafe_artesano_core::{Email, NewsletterError, SubscribeOutcome, translate};

use crate::db::RepositoryError;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Shopper;
use crate::models::Toast;
use crate::routes::{FormInput, safe_return_to};
use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
    pub return_to: Option<String>,
}

/// Subscribe to the newsletter.
#[instrument(skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    shopper: Shopper,
    form: FormInput<SubscribeForm>,
) -> Result<Redirect> {
    let Form(form) = form?;
    let raw_email = form.email;

    // Only well-formed addresses pay the simulated processing time
    if Email::parse(&raw_email.trim().to_lowercase()).is_ok() {
        tokio::time::sleep(state.config().newsletter_delay).await;
    }

    let store = state.subscribers();
    let outcome = tokio::task::spawn_blocking(move || {
        let _updating = store.lock_updates();
        cafe_artesano_core::subscribe(&*store, &raw_email)
    })
    .await
    .map_err(|e| AppError::Storage(RepositoryError::TaskFailed(e.to_string())))?;

    let locale = shopper.locale().await;
    let toast = match outcome {
        Ok(SubscribeOutcome::Subscribed(email)) => {
            tracing::info!(email = %email, "Newsletter subscription successful");
            add_breadcrumb("newsletter", "Subscribed", &[]);
            shopper.mark_subscribed().await?;
            Toast::success(translate(locale, "newsletter.success"))
                .with_description("You'll receive our latest updates and brewing tips.")
        }
        Ok(SubscribeOutcome::AlreadySubscribed(email)) => {
            tracing::info!(email = %email, "Email already subscribed");
            Toast::error("Already subscribed")
                .with_description("This email is already subscribed to our newsletter.")
        }
        Err(NewsletterError::MissingEmail) => {
            Toast::error("Email required").with_description("Please enter your email address.")
        }
        Err(NewsletterError::InvalidEmail(reason)) => {
            tracing::debug!(%reason, "Rejected newsletter email");
            Toast::error("Invalid email").with_description("Please enter a valid email address.")
        }
        Err(err @ NewsletterError::Storage(_)) => {
            let event_id = sentry::capture_error(&err);
            tracing::error!(error = %err, sentry_event_id = %event_id, "Newsletter storage failed");
            Toast::error(translate(locale, "common.error"))
                .with_description("Something went wrong. Please try again.")
        }
    };

    shopper.push_toast(toast).await?;

    Ok(Redirect::to(&safe_return_to(
        form.return_to.as_deref(),
        "/#newsletter",
    )))
}
