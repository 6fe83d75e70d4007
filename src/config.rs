//! Form configuration: number locale, window title, completion.
//!
//! [`NumberLocale`] carries the single decimal separator numeric fields accept.
//! [`FormConfig`] bundles it with the remaining build-time options and is passed
//! to [`Form::build_with`](crate::form::Form::build_with).

// ---------------------------------------------------------------------------
// NumberLocale
// ---------------------------------------------------------------------------

/// Languages whose conventional decimal separator is a comma.
const COMMA_LANGUAGES: &[&str] = &[
    "af", "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fo",
    "fr", "gl", "hr", "hu", "hy", "id", "is", "it", "ka", "kk", "ky", "lt", "lv", "mk", "mn",
    "nb", "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk",
    "uz", "vi",
];

/// The decimal separator recognized by numeric fields.
///
/// Exactly one separator is "active"; its counterpart (`.` for `,` and vice
/// versa) is the *alternate* separator, whose presence makes numeric text
/// unparsable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberLocale {
    decimal: char,
}

impl NumberLocale {
    /// `.` as decimal separator.
    pub const POINT: Self = Self { decimal: '.' };
    /// `,` as decimal separator.
    pub const COMMA: Self = Self { decimal: ',' };

    /// The active decimal separator.
    pub fn decimal(&self) -> char {
        self.decimal
    }

    /// The separator that is *not* accepted.
    pub fn alternate(&self) -> char {
        if self.decimal == '.' {
            ','
        } else {
            '.'
        }
    }

    /// Derive the separator from a BCP-47 / POSIX style tag (`de-DE`, `fr_FR.UTF-8`, `en`).
    ///
    /// Unknown or empty tags fall back to [`NumberLocale::POINT`].
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if COMMA_LANGUAGES.contains(&language.as_str()) {
            Self::COMMA
        } else {
            Self::POINT
        }
    }

    /// The separator of the operating system locale.
    #[cfg(feature = "system-locale")]
    pub fn system() -> Self {
        match sys_locale::get_locale() {
            Some(tag) => {
                let locale = Self::from_tag(&tag);
                tracing::debug!(%tag, decimal = %locale.decimal, "detected system number locale");
                locale
            }
            None => Self::POINT,
        }
    }

    /// The separator of the operating system locale.
    ///
    /// Without the `system-locale` feature this is always [`NumberLocale::POINT`].
    #[cfg(not(feature = "system-locale"))]
    pub fn system() -> Self {
        Self::POINT
    }

    /// Rewrite `text` so that the active separator becomes `.` for Rust's parsers.
    pub(crate) fn normalize(&self, text: &str) -> String {
        text.trim().replace(self.decimal, ".")
    }

    /// Format a float with the active separator.
    pub fn format_float(&self, value: f64) -> String {
        let text = value.to_string();
        if self.decimal == '.' {
            text
        } else {
            text.replace('.', &self.decimal.to_string())
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::system()
    }
}

// ---------------------------------------------------------------------------
// FormConfig
// ---------------------------------------------------------------------------

/// Build-time configuration for a form instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    /// Decimal separator used by numeric fields.
    pub locale: NumberLocale,
    /// Optional window title for the root group.
    pub window_title: Option<String>,
    /// Whether text inputs offer completions from enumerable ranges.
    pub completion: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            locale: NumberLocale::default(),
            window_title: None,
            completion: true,
        }
    }
}

impl FormConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number locale (builder).
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the window title (builder).
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = Some(title.into());
        self
    }

    /// Enable or disable input completion (builder).
    pub fn with_completion(mut self, completion: bool) -> Self {
        self.completion = completion;
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternate_is_the_other_separator() {
        assert_eq!(NumberLocale::POINT.alternate(), ',');
        assert_eq!(NumberLocale::COMMA.alternate(), '.');
    }

    #[test]
    fn from_tag_languages() {
        assert_eq!(NumberLocale::from_tag("de-DE"), NumberLocale::COMMA);
        assert_eq!(NumberLocale::from_tag("nb_NO.UTF-8"), NumberLocale::COMMA);
        assert_eq!(NumberLocale::from_tag("FR"), NumberLocale::COMMA);
        assert_eq!(NumberLocale::from_tag("en-US"), NumberLocale::POINT);
        assert_eq!(NumberLocale::from_tag("ja"), NumberLocale::POINT);
        assert_eq!(NumberLocale::from_tag(""), NumberLocale::POINT);
    }

    #[test]
    fn normalize_replaces_active_separator() {
        assert_eq!(NumberLocale::COMMA.normalize(" 1,5 "), "1.5");
        assert_eq!(NumberLocale::POINT.normalize("1.5"), "1.5");
    }

    #[test]
    fn format_float_uses_active_separator() {
        assert_eq!(NumberLocale::POINT.format_float(2.5), "2.5");
        assert_eq!(NumberLocale::COMMA.format_float(2.5), "2,5");
        assert_eq!(NumberLocale::COMMA.format_float(10.0), "10");
    }

    #[test]
    fn config_builder() {
        let config = FormConfig::new()
            .with_locale(NumberLocale::COMMA)
            .with_window_title("Test window")
            .with_completion(false);
        assert_eq!(config.locale, NumberLocale::COMMA);
        assert_eq!(config.window_title.as_deref(), Some("Test window"));
        assert!(!config.completion);
    }

    #[test]
    fn config_defaults() {
        let config = FormConfig::default();
        assert!(config.window_title.is_none());
        assert!(config.completion);
    }
}
