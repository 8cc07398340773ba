//! Request payloads and their validation

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Newsletter signup body
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

/// Contact form body
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A validated subscription
#[derive(Debug, PartialEq)]
pub struct NewSubscriber {
    pub email: String,
}

/// A validated contact message
#[derive(Debug, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Collects field issues into one readable message
#[derive(Default)]
struct Issues(Vec<String>);

impl Issues {
    fn required(&mut self, field: &str, value: Option<String>) -> String {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.0.push(format!("Required at \"{}\"", field));
                String::new()
            }
        }
    }

    fn email(&mut self, field: &str, value: Option<String>) -> String {
        let email = self.required(field, value);
        if !email.is_empty() && !EMAIL_RE.is_match(&email) {
            self.0.push(format!("Invalid email at \"{}\"", field));
        }
        email
    }

    fn finish<T>(self, value: T) -> Result<T, String> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0.join("; "))
        }
    }
}

impl SubscribeRequest {
    pub fn validate(self) -> Result<NewSubscriber, String> {
        let mut issues = Issues::default();
        let email = issues.email("email", self.email);
        issues.finish(NewSubscriber { email })
    }
}

impl ContactRequest {
    pub fn validate(self) -> Result<NewContact, String> {
        let mut issues = Issues::default();
        let name = issues.required("name", self.name);
        let email = issues.email("email", self.email);
        let message = issues.required("message", self.message);
        issues.finish(NewContact {
            name,
            email,
            message,
        })
    }
}
