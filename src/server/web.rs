use std::sync::Arc;

use axum::{
  response::{IntoResponse, Redirect},
  routing, Extension, Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use tracing::debug;

use crate::{
  contact::{render_feedback, ContactForm},
  loader::FeedLoader,
  panel::Panel,
  theme::Theme,
};

pub fn router() -> Router {
  Router::new()
    .route("/", routing::get(handle_home))
    .route("/writing", routing::get(handle_writing))
    .route("/theme", routing::post(handle_theme))
    .route("/contact", routing::post(handle_contact))
}

async fn handle_home(
  jar: CookieJar,
  Extension(loader): Extension<Arc<FeedLoader>>,
) -> Markup {
  let mut panel = Panel::new();
  panel.show_loading(loader.skeleton_count());
  render_page(Theme::from_jar(&jar), &panel, true)
}

// every request gets its own panel, so loads never share state
async fn handle_writing(
  Extension(loader): Extension<Arc<FeedLoader>>,
) -> Markup {
  let mut panel = Panel::new();
  loader.load_posts(&mut panel).await;
  panel.render()
}

async fn handle_theme(jar: CookieJar) -> impl IntoResponse {
  let theme = Theme::from_jar(&jar).toggled();
  debug!(theme = theme.as_str(), "theme toggled");
  (jar.add(theme.to_cookie()), Redirect::to("/"))
}

async fn handle_contact(Form(form): Form<ContactForm>) -> Markup {
  let result = form.validate();
  if let Err(errors) = &result {
    debug!(?errors, "contact form rejected");
  }
  render_feedback(&result)
}

/// Renders the full page around `panel`. With `lazy` set, the panel asks
/// for `/writing` once the page has loaded and swaps in the result.
pub fn render_page(theme: Theme, panel: &Panel, lazy: bool) -> Markup {
  html! {
    (DOCTYPE)
    html lang="en" data-theme=(theme.as_str()) {
      head {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        title { "Writing" }
        (header_libs_fragment())
      }
      body {
        nav #navbar .navbar {
          form method="post" action="/theme" {
            button #theme-toggle .theme-toggle type="submit"
              aria-label="Toggle theme" {
              span .theme-icon { (theme.icon()) }
            }
          }
        }
        main {
          section #writing .writing-section {
            h2 .section-title { "Writing" }
            @if lazy {
              div #writing-panel hx-get="/writing" hx-trigger="load"
                hx-swap="innerHTML" {
                (panel.render())
              }
            } @else {
              div #writing-panel { (panel.render()) }
            }
          }
          section #contact .contact-section {
            h2 .section-title { "Get in touch" }
            (contact_form_fragment())
          }
        }
      }
    }
  }
}

fn contact_form_fragment() -> Markup {
  html! {
    form #contact-form method="post" action="/contact"
      hx-post="/contact" hx-target="#contact-feedback" {
      div #contact-feedback {}
      input type="text" name="name" placeholder="Your name";
      input type="email" name="email" placeholder="you@example.com";
      input type="text" name="subject" placeholder="Subject";
      textarea name="message" rows="5" placeholder="Message" {}
      button .btn .btn-primary type="submit" { "Send Message" }
    }
  }
}

fn header_libs_fragment() -> Markup {
  html! {
    script
      src="https://unpkg.com/htmx.org@2.0.1"
      referrerpolicy="no-referrer" {}
    style { (PreEscaped(extra_styles())) }
  }
}

fn extra_styles() -> &'static str {
  r#"
  .writing-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr));
    gap: 1rem;
  }
  .post-tile {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    padding: 1rem;
    border-radius: 12px;
    text-decoration: none;
    color: inherit;
  }
  .skeleton-line {
    height: 0.8rem;
    border-radius: 4px;
    background: rgba(127, 127, 127, 0.2);
  }
  .skeleton-line.short {
    width: 60%;
  }
  .error-message {
    background: #fee2e2;
    color: #dc2626;
    padding: 1rem;
    border-radius: 8px;
  }
"#
}

#[cfg(test)]
mod test {
  use axum::body::{to_bytes, Body};
  use http::{header, Request, StatusCode};
  use tower::ServiceExt;

  use crate::{
    error::Error,
    feed::PostRecord,
    loader::FeedLoader,
    server::router,
    test_utils::StaticTier,
  };

  use super::*;

  fn app(tiers: Vec<crate::source::BoxedTier>) -> Router {
    let loader =
      FeedLoader::new(tiers, PostRecord::fallback(), "https://profile.example");
    router(Arc::new(loader))
  }

  async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
  }

  #[tokio::test]
  async fn test_home_shows_skeletons() {
    let resp = app(vec![]).oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_string(resp).await;
    assert_eq!(body.matches("post-tile skeleton").count(), 6);
    assert!(body.contains("Loading posts..."));
    assert!(body.contains(r#"hx-get="/writing""#));
    assert!(body.contains(r#"data-theme="light""#));
  }

  #[tokio::test]
  async fn test_home_uses_theme_cookie() {
    let req = Request::get("/")
      .header(header::COOKIE, "theme=dark")
      .body(Body::empty())
      .unwrap();
    let body = body_string(app(vec![]).oneshot(req).await.unwrap()).await;
    assert!(body.contains(r#"data-theme="dark""#));
    assert!(body.contains("☀️"));
  }

  #[tokio::test]
  async fn test_writing_fragment_renders_posts() {
    let post = PostRecord {
      title: "Fresh post".into(),
      ..PostRecord::fallback()
    };
    let app = app(vec![Box::new(StaticTier::ok(vec![post]))]);

    let body = body_string(app.oneshot(get("/writing")).await.unwrap()).await;
    assert!(body.contains("Fresh post"));
    assert!(!body.contains("skeleton"));
    assert!(!body.contains("Loading posts..."));
  }

  #[tokio::test]
  async fn test_writing_fragment_on_failure() {
    let app = app(vec![Box::new(StaticTier::err(|| Error::EmptyFeed))]);

    let body = body_string(app.oneshot(get("/writing")).await.unwrap()).await;
    assert_eq!(body.matches(r#"class="post-tile""#).count(), 1);
    assert!(body.contains("Couldn’t load posts right now."));
    assert!(body.contains(r#"href="https://profile.example""#));
  }

  #[tokio::test]
  async fn test_theme_toggle_sets_cookie() {
    let req = Request::post("/theme")
      .header(header::COOKIE, "theme=light")
      .body(Body::empty())
      .unwrap();
    let resp = app(vec![]).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/");
    let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("theme=dark"), "{cookie}");
  }

  #[tokio::test]
  async fn test_contact_validation() {
    let req = Request::post("/contact")
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from("name=Ada&email=not-an-email&subject=&message=hi"))
      .unwrap();
    let body = body_string(app(vec![]).oneshot(req).await.unwrap()).await;
    assert!(body.contains("<li>Please enter a valid email</li>"));
    assert!(body.contains("<li>Subject is required</li>"));
    assert!(!body.contains("Name is required"));

    let req = Request::post("/contact")
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from(
        "name=Ada&email=ada%40example.com&subject=Hi&message=Hello",
      ))
      .unwrap();
    let body = body_string(app(vec![]).oneshot(req).await.unwrap()).await;
    assert!(body.contains("Message Sent!"));
  }

  #[tokio::test]
  async fn test_health_and_not_found() {
    let resp = app(vec![]).oneshot(get("/health")).await.unwrap();
    assert_eq!(body_string(resp).await, "ok");

    let resp = app(vec![]).oneshot(get("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
