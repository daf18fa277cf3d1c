//! Scripted page states for handler tests.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::page::{PageDriver, PageError};
use crate::selectors::Role;

/// A fixture DOM: a set of present selectors plus recorded interactions.
pub(crate) struct FixturePage {
    present: Mutex<HashSet<&'static str>>,
    disabled: Mutex<HashSet<&'static str>>,
    clicked: Mutex<Vec<String>>,
    typed: Mutex<Vec<(String, char)>>,
    eval_result: Mutex<Value>,
    url: String,
}

impl FixturePage {
    pub fn new() -> Self {
        Self {
            present: Mutex::new(HashSet::new()),
            disabled: Mutex::new(HashSet::new()),
            clicked: Mutex::new(Vec::new()),
            typed: Mutex::new(Vec::new()),
            eval_result: Mutex::new(Value::Null),
            url: "https://www.linkedin.com/in/fixture/".to_string(),
        }
    }

    /// Make a role's top-ranked selector present.
    pub fn show(self, role: Role) -> Self {
        self.present.lock().insert(role.candidates()[0]);
        self
    }

    /// Present but disabled.
    pub fn disable(self, role: Role) -> Self {
        let selector = role.candidates()[0];
        self.present.lock().insert(selector);
        self.disabled.lock().insert(selector);
        self
    }

    /// Scripted response for the next `eval_json` call.
    pub fn with_eval(self, value: Value) -> Self {
        *self.eval_result.lock() = value;
        self
    }

    pub fn clicks(&self) -> Vec<String> {
        self.clicked.lock().clone()
    }

    /// Everything typed into one selector, in order.
    pub fn typed_into(&self, selector: &str) -> String {
        self.typed
            .lock()
            .iter()
            .filter(|(sel, _)| sel == selector)
            .map(|(_, ch)| *ch)
            .collect()
    }
}

#[async_trait]
impl PageDriver for FixturePage {
    async fn exists(&self, selector: &str) -> Result<bool, PageError> {
        Ok(self.present.lock().contains(selector))
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        self.clicked.lock().push(selector.to_string());
        Ok(())
    }

    async fn type_char(&self, selector: &str, ch: char) -> Result<(), PageError> {
        self.typed.lock().push((selector.to_string(), ch));
        Ok(())
    }

    async fn text(&self, selector: &str) -> Result<Option<String>, PageError> {
        Ok(self
            .present
            .lock()
            .contains(selector)
            .then(|| String::new()))
    }

    async fn enabled(&self, selector: &str) -> Result<bool, PageError> {
        Ok(self.present.lock().contains(selector) && !self.disabled.lock().contains(selector))
    }

    async fn eval_json(&self, _expression: &str) -> Result<Value, PageError> {
        Ok(self.eval_result.lock().clone())
    }

    async fn navigate(&self, _url: &str) -> Result<(), PageError> {
        Ok(())
    }

    async fn current_url(&self) -> Result<String, PageError> {
        Ok(self.url.clone())
    }

    async fn pause(&self, _duration: Duration) {}
}
