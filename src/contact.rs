use maud::{html, Markup};
use regex::Regex;
use serde::Deserialize;

pub const SENT_TEXT: &str = "Message Sent! ✓";

/// A contact form submission. Nothing is delivered anywhere; submissions
/// are validated and acknowledged.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContactForm {
  pub name: String,
  pub email: String,
  pub subject: String,
  pub message: String,
}

impl ContactForm {
  /// Collects every problem with the form rather than stopping at the
  /// first one.
  pub fn validate(&self) -> Result<(), Vec<&'static str>> {
    let mut errors = vec![];

    if self.name.trim().is_empty() {
      errors.push("Name is required");
    }

    if self.email.trim().is_empty() {
      errors.push("Email is required");
    } else if !is_valid_email(&self.email) {
      errors.push("Please enter a valid email");
    }

    if self.subject.trim().is_empty() {
      errors.push("Subject is required");
    }

    if self.message.trim().is_empty() {
      errors.push("Message is required");
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors)
    }
  }
}

fn is_valid_email(email: &str) -> bool {
  lazy_static::lazy_static! {
    static ref RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
  }
  RE.is_match(email)
}

pub fn render_feedback(result: &Result<(), Vec<&'static str>>) -> Markup {
  html! {
    @match result {
      Ok(()) => {
        p .form-success { (SENT_TEXT) }
      },
      Err(errors) => {
        div .error-message {
          strong { "Please fix the following errors:" }
          ul {
            @for error in errors {
              li { (error) }
            }
          }
        }
      },
    }
  }
}
