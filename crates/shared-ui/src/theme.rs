use dioxus::prelude::*;

/// localStorage key holding the chosen mode.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Light or dark rendering of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// All modes in display order.
pub const ALL_MODES: &[ThemeMode] = &[ThemeMode::Light, ThemeMode::Dark];

impl ThemeMode {
    /// Value stored under [`THEME_STORAGE_KEY`] and set as `data-theme`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse a stored key, falling back to light.
    pub fn from_key(s: &str) -> Self {
        match s.trim() {
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label for the control that switches away from this mode.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Dark mode",
            ThemeMode::Dark => "Light mode",
        }
    }
}

/// Shared theme state provided as context by [`ThemeSeed`].
#[derive(Clone, Copy)]
pub struct ThemeState {
    pub mode: Signal<ThemeMode>,
}

impl ThemeState {
    pub fn current(&self) -> ThemeMode {
        *self.mode.read()
    }

    /// Flip between light and dark, then persist and apply.
    pub fn toggle(&mut self) {
        let next = self.current().toggled();
        self.mode.set(next);
        set_theme(next);
    }
}

/// Access the theme state provided by [`ThemeSeed`].
pub fn use_theme() -> ThemeState {
    use_context::<ThemeState>()
}

/// Provide [`ThemeState`] to `children` and seed it on startup.
///
/// Reads the persisted mode from localStorage and applies it to the
/// document root. Without a stored value `default_theme` applies.
#[component]
pub fn ThemeSeed(#[props(default = "light".to_string())] default_theme: String, children: Element) -> Element {
    let fallback = ThemeMode::from_key(&default_theme);
    let mut state = use_context_provider(|| ThemeState {
        mode: Signal::new(fallback),
    });

    use_effect(move || {
        spawn(async move {
            let mut eval = document::eval(&read_script(fallback));
            let stored = eval.recv::<String>().await.ok();
            let mode = stored
                .as_deref()
                .map(ThemeMode::from_key)
                .unwrap_or(fallback);
            state.mode.set(mode);
        });
    });

    rsx! {
        {children}
    }
}

/// Persist `mode` and set it on the document root.
pub fn set_theme(mode: ThemeMode) {
    document::eval(&apply_script(mode));
}

fn read_script(fallback: ThemeMode) -> String {
    format!(
        r#"
        var theme = null;
        try {{ theme = window.localStorage.getItem('{key}'); }} catch (e) {{}}
        if (theme !== 'light' && theme !== 'dark') {{ theme = '{fallback}'; }}
        document.documentElement.setAttribute('data-theme', theme);
        dioxus.send(theme);
        "#,
        key = THEME_STORAGE_KEY,
        fallback = fallback.as_str(),
    )
}

fn apply_script(mode: ThemeMode) -> String {
    format!(
        r#"
        try {{ window.localStorage.setItem('{key}', '{theme}'); }} catch (e) {{}}
        document.documentElement.setAttribute('data-theme', '{theme}');
        "#,
        key = THEME_STORAGE_KEY,
        theme = mode.as_str(),
    )
}
