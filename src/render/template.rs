use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("invalid regex"));

/// Values for the `{name}` tokens of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders(HashMap<String, String>);

impl Placeholders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Placeholders::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets the value for `{name}`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let _ = self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Placeholders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Substitutes every `{name}` token in `template` that has a value in `placeholders`.
///
/// Tokens without a value stay in the output as written. The template is
/// scanned once, so substituted values are never themselves expanded.
#[must_use]
pub fn render(template: &str, placeholders: &Placeholders) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| {
            let token = caps.get(0).map_or("", |m| m.as_str());
            caps.get(1)
                .and_then(|name| placeholders.get(name.as_str()))
                .unwrap_or(token)
                .to_string()
        })
        .into_owned()
}
