//! Attribute selectors: `tag[name]`, `tag[name="v"]`, `tag[name^="v"]`.

use std::fmt;

use super::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrCondition {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

impl AttrCondition {
    fn matches(&self, el: &Element) -> bool {
        match self {
            AttrCondition::Exists(name) => el.has_attr(name),
            AttrCondition::Equals(name, value) => el.attr(name).as_deref() == Some(value.as_str()),
            AttrCondition::Prefix(name, prefix) => el
                .attr(name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
        }
    }
}

/// Optional tag name plus attribute conditions, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrSelector {
    tag: Option<String>,
    conditions: Vec<AttrCondition>,
}

impl AttrSelector {
    /// Matches any element.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            conditions: Vec::new(),
        }
    }

    pub fn exists(mut self, name: &str) -> Self {
        self.conditions.push(AttrCondition::Exists(name.to_string()));
        self
    }

    pub fn equals(mut self, name: &str, value: &str) -> Self {
        self.conditions
            .push(AttrCondition::Equals(name.to_string(), value.to_string()));
        self
    }

    pub fn prefix(mut self, name: &str, prefix: &str) -> Self {
        self.conditions
            .push(AttrCondition::Prefix(name.to_string(), prefix.to_string()));
        self
    }

    pub fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if el.tag() != tag {
                return false;
            }
        }
        self.conditions.iter().all(|c| c.matches(el))
    }
}

impl fmt::Display for AttrSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}", tag)?,
            None if self.conditions.is_empty() => write!(f, "*")?,
            None => {}
        }
        for c in &self.conditions {
            match c {
                AttrCondition::Exists(n) => write!(f, "[{}]", n)?,
                AttrCondition::Equals(n, v) => write!(f, "[{}=\"{}\"]", n, v)?,
                AttrCondition::Prefix(n, v) => write!(f, "[{}^=\"{}\"]", n, v)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_conditions_must_hold() {
        let a = Element::new("a")
            .with_attr("href", "/profile/alice/post/1")
            .with_attr("dir", "auto");
        let sel = AttrSelector::tag("a").prefix("href", "/profile/").equals("dir", "auto");
        assert!(sel.matches(&a));
        assert!(!sel.clone().exists("data-tooltip").matches(&a));
        assert!(!AttrSelector::tag("img").matches(&a));
    }

    #[test]
    fn display_is_css_like() {
        let sel = AttrSelector::tag("img").prefix("src", "https://cdn/");
        assert_eq!(sel.to_string(), "img[src^=\"https://cdn/\"]");
        assert_eq!(AttrSelector::any().exists("role").to_string(), "[role]");
        assert_eq!(AttrSelector::any().to_string(), "*");
    }
}
