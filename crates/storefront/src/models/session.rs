//! Session-related types.
//!
//! Everything a visitor accumulates lives in their session: the cart lines,
//! the chosen locale, whether they already joined the newsletter, and toasts
//! waiting to be shown on the next rendered page.

use serde::{Deserialize, Serialize};

/// How a toast is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    /// CSS modifier class for the toast.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Info => "toast--info",
            Self::Error => "toast--error",
        }
    }
}

/// A one-shot notification shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Toast {
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: title.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            title: title.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: title.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Session keys for visitor data.
pub mod keys {
    /// Key for the cart line items.
    pub const CART_ITEMS: &str = "cart_items";

    /// Key for the selected UI locale.
    pub const LOCALE: &str = "locale";

    /// Key set once the visitor has joined the newsletter.
    pub const NEWSLETTER_SUBSCRIBED: &str = "newsletter_subscribed";

    /// Key for toasts queued for the next rendered page.
    pub const TOASTS: &str = "toasts";
}
