use dioxus::prelude::*;

/// Resolve the CSS `data-theme` attribute value for the fleet theme.
pub fn resolve_theme(is_dark: bool) -> &'static str {
    if is_dark {
        "fleet"
    } else {
        "fleet-light"
    }
}

/// Shared theme state provided as context.
///
/// The sidebar dark/light toggle reads and writes this signal. Changes call
/// [`set_theme`] to apply.
#[derive(Clone, Copy)]
pub struct ThemeState {
    pub is_dark: Signal<bool>,
}

impl ThemeState {
    /// Apply the current mode to the document.
    pub fn apply(&self) {
        set_theme(resolve_theme(*self.is_dark.read()));
    }
}

/// Seed the theme on application startup.
///
/// Reads the persisted theme from a cookie and applies it to the document
/// root. Call this once in your top-level App component.
#[component]
pub fn ThemeSeed() -> Element {
    use_effect(|| {
        document::eval(
            r#"
            (function() {
                var match = document.cookie.match(/(?:^|;\s*)theme=([^;]*)/);
                var theme = match ? match[1] : 'fleet';
                document.documentElement.setAttribute('data-theme', theme);
            })();
            "#,
        );
    });

    rsx! {}
}

/// Set the active theme, persisting to a cookie and updating the document.
pub fn set_theme(theme: &str) {
    document::eval(&format!(
        r#"
        (function() {{
            document.cookie = 'theme={theme};path=/;max-age=2592000;SameSite=Lax';
            document.documentElement.setAttribute('data-theme', '{theme}');
        }})();
        "#,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_theme_maps_modes() {
        assert_eq!(resolve_theme(true), "fleet");
        assert_eq!(resolve_theme(false), "fleet-light");
    }
}
