//! Locale-keyed UI strings.
//!
//! Lookups never fail: a key missing from the selected locale's table comes
//! back unchanged, so an untranslated label shows as e.g. `"cart.title"`
//! instead of breaking the page. There is no cross-locale fallback.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Error returned for an unsupported locale code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(pub String);

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Self; 2] = [Self::En, Self::Es];

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// The language's own name for itself.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
        }
    }

    fn table(self) -> &'static HashMap<&'static str, &'static str> {
        match self {
            Self::En => &EN,
            Self::Es => &ES,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LocaleError(s.to_string()))
    }
}

/// Look up `key` in `locale`'s table, returning the key itself when missing.
#[must_use]
pub fn translate<'a>(locale: Locale, key: &'a str) -> &'a str {
    locale.table().get(key).copied().unwrap_or(key)
}

/// A locale bound for repeated lookups, e.g. from templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// See [`translate`].
    #[must_use]
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        translate(self.locale, key)
    }
}

static EN: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Navigation
        ("nav.home", "Home"),
        ("nav.products", "Products"),
        ("nav.brewing", "Brewing Guide"),
        ("nav.blog", "Blog"),
        ("nav.contact", "Contact"),
        ("nav.cart", "Cart"),
        ("nav.login", "Login"),
        ("nav.signup", "Sign Up"),
        // Hero
        ("hero.title", "Discover Your Perfect Brew"),
        (
            "hero.subtitle",
            "From bean to cup, experience the art of premium coffee crafted with passion and precision.",
        ),
        ("hero.cta", "Shop Now"),
        ("hero.learn", "Learn More"),
        // Products
        ("products.title", "Featured Coffee"),
        (
            "products.subtitle",
            "Carefully selected beans from the world's finest coffee regions",
        ),
        ("products.addToCart", "Add to Cart"),
        ("products.viewDetails", "View Details"),
        ("products.price", "Price"),
        ("products.origin", "Origin"),
        ("products.roast", "Roast Level"),
        ("products.notes", "Tasting Notes"),
        // Brewing guide
        ("brewing.title", "Perfect Brewing Guide"),
        (
            "brewing.subtitle",
            "Master the art of coffee brewing with our expert techniques",
        ),
        ("brewing.espresso", "Espresso"),
        ("brewing.pourover", "Pour Over"),
        ("brewing.frenchpress", "French Press"),
        ("brewing.cold", "Cold Brew"),
        // Newsletter
        ("newsletter.title", "Stay Connected"),
        (
            "newsletter.subtitle",
            "Get exclusive offers and brewing tips delivered to your inbox",
        ),
        ("newsletter.placeholder", "Enter your email"),
        ("newsletter.subscribe", "Subscribe"),
        ("newsletter.success", "Thanks for subscribing!"),
        // Footer
        ("footer.about", "About Us"),
        ("footer.contact", "Contact"),
        ("footer.privacy", "Privacy Policy"),
        ("footer.terms", "Terms of Service"),
        ("footer.social", "Follow Us"),
        // Authentication
        ("auth.login", "Login"),
        ("auth.signup", "Sign Up"),
        ("auth.email", "Email"),
        ("auth.password", "Password"),
        ("auth.confirmPassword", "Confirm Password"),
        ("auth.name", "Full Name"),
        ("auth.loginButton", "Sign In"),
        ("auth.signupButton", "Create Account"),
        ("auth.switchToSignup", "Don't have an account? Sign up"),
        ("auth.switchToLogin", "Already have an account? Sign in"),
        // Cart
        ("cart.title", "Shopping Cart"),
        ("cart.empty", "Your cart is empty"),
        ("cart.continueShopping", "Continue Shopping"),
        ("cart.checkout", "Proceed to Checkout"),
        ("cart.total", "Total"),
        ("cart.quantity", "Quantity"),
        ("cart.remove", "Remove"),
        // Common
        ("common.loading", "Loading..."),
        ("common.error", "An error occurred"),
        ("common.success", "Success!"),
        ("common.cancel", "Cancel"),
        ("common.confirm", "Confirm"),
        ("common.close", "Close"),
    ])
});

static ES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Navigation
        ("nav.home", "Inicio"),
        ("nav.products", "Productos"),
        ("nav.brewing", "Guía de Preparación"),
        ("nav.blog", "Blog"),
        ("nav.contact", "Contacto"),
        ("nav.cart", "Carrito"),
        ("nav.login", "Iniciar Sesión"),
        ("nav.signup", "Registrarse"),
        // Hero
        ("hero.title", "Descubre Tu Café Perfecto"),
        (
            "hero.subtitle",
            "Del grano a la taza, experimenta el arte del café premium elaborado con pasión y precisión.",
        ),
        ("hero.cta", "Comprar Ahora"),
        ("hero.learn", "Saber Más"),
        // Products
        ("products.title", "Café Destacado"),
        (
            "products.subtitle",
            "Granos cuidadosamente seleccionados de las mejores regiones cafeteras del mundo",
        ),
        ("products.addToCart", "Añadir al Carrito"),
        ("products.viewDetails", "Ver Detalles"),
        ("products.price", "Precio"),
        ("products.origin", "Origen"),
        ("products.roast", "Nivel de Tueste"),
        ("products.notes", "Notas de Cata"),
        // Brewing guide
        ("brewing.title", "Guía de Preparación Perfecta"),
        (
            "brewing.subtitle",
            "Domina el arte de preparar café con nuestras técnicas expertas",
        ),
        ("brewing.espresso", "Espresso"),
        ("brewing.pourover", "Goteo"),
        ("brewing.frenchpress", "Prensa Francesa"),
        ("brewing.cold", "Café Frío"),
        // Newsletter
        ("newsletter.title", "Mantente Conectado"),
        (
            "newsletter.subtitle",
            "Recibe ofertas exclusivas y consejos de preparación en tu bandeja de entrada",
        ),
        ("newsletter.placeholder", "Ingresa tu email"),
        ("newsletter.subscribe", "Suscribirse"),
        ("newsletter.success", "¡Gracias por suscribirte!"),
        // Footer
        ("footer.about", "Nosotros"),
        ("footer.contact", "Contacto"),
        ("footer.privacy", "Política de Privacidad"),
        ("footer.terms", "Términos de Servicio"),
        ("footer.social", "Síguenos"),
        // Authentication
        ("auth.login", "Iniciar Sesión"),
        ("auth.signup", "Registrarse"),
        ("auth.email", "Email"),
        ("auth.password", "Contraseña"),
        ("auth.confirmPassword", "Confirmar Contraseña"),
        ("auth.name", "Nombre Completo"),
        ("auth.loginButton", "Entrar"),
        ("auth.signupButton", "Crear Cuenta"),
        ("auth.switchToSignup", "¿No tienes cuenta? Regístrate"),
        ("auth.switchToLogin", "¿Ya tienes cuenta? Inicia sesión"),
        // Cart
        ("cart.title", "Carrito de Compra"),
        ("cart.empty", "Tu carrito está vacío"),
        ("cart.continueShopping", "Continuar Comprando"),
        ("cart.checkout", "Proceder al Pago"),
        ("cart.total", "Total"),
        ("cart.quantity", "Cantidad"),
        ("cart.remove", "Eliminar"),
        // Common
        ("common.loading", "Cargando..."),
        ("common.error", "Ocurrió un error"),
        ("common.success", "¡Éxito!"),
        ("common.cancel", "Cancelar"),
        ("common.confirm", "Confirmar"),
        ("common.close", "Cerrar"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_key() {
        assert_eq!(translate(Locale::En, "cart.title"), "Shopping Cart");
        assert_eq!(translate(Locale::Es, "cart.title"), "Carrito de Compra");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        assert_eq!(translate(Locale::En, "cart.coupon"), "cart.coupon");
        assert_eq!(translate(Locale::Es, "cart.coupon"), "cart.coupon");
        assert_eq!(translate(Locale::En, ""), "");
    }

    #[test]
    fn test_tables_have_same_keys() {
        let mut en: Vec<_> = EN.keys().collect();
        let mut es: Vec<_> = ES.keys().collect();
        en.sort();
        es.sort();
        assert_eq!(en, es);
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("es".parse(), Ok(Locale::Es));
        assert_eq!(" EN ".parse(), Ok(Locale::En));
        assert_eq!("fr".parse::<Locale>(), Err(LocaleError("fr".to_string())));
    }

    #[test]
    fn test_translator_binds_locale() {
        let t = Translator::new(Locale::Es);
        assert_eq!(t.locale(), Locale::Es);
        assert_eq!(t.get("nav.cart"), "Carrito");
        assert_eq!(t.get("nav.unknown"), "nav.unknown");
    }
}
