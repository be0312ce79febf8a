use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const THEME_COOKIE: &str = "theme";

/// The page's color scheme, the only preference that is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

impl Theme {
  /// Unknown or missing values fall back to [`Theme::Light`].
  pub fn parse(value: Option<&str>) -> Self {
    match value {
      Some("dark") => Theme::Dark,
      _ => Theme::Light,
    }
  }

  pub fn from_jar(jar: &CookieJar) -> Self {
    Self::parse(jar.get(THEME_COOKIE).map(|c| c.value()))
  }

  pub fn toggled(self) -> Self {
    match self {
      Theme::Light => Theme::Dark,
      Theme::Dark => Theme::Light,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Theme::Light => "light",
      Theme::Dark => "dark",
    }
  }

  /// Icon on the toggle button, hinting at the theme a click switches to.
  pub fn icon(self) -> &'static str {
    match self {
      Theme::Light => "🌙",
      Theme::Dark => "☀️",
    }
  }

  pub fn to_cookie(self) -> Cookie<'static> {
    Cookie::build((THEME_COOKIE, self.as_str()))
      .path("/")
      .same_site(SameSite::Lax)
      .permanent()
      .build()
  }
}
