//! Style scope port: where an applied theme is written.

use crate::utils::html::escape_html;
use std::collections::{BTreeMap, BTreeSet};

/// Target that receives theme attributes, classes and custom properties.
pub trait StyleScope {
    fn set_attribute(&mut self, name: &str, value: &str);

    fn set_class(&mut self, class: &str, enabled: bool);

    /// Set a CSS custom property (`name` includes the leading `--`).
    fn set_property(&mut self, name: &str, value: &str);
}

/// In-memory document root element.
///
/// Everything is kept in sorted maps so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRoot {
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    properties: BTreeMap<String, String>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes and classes rendered for an opening `<html>` tag,
    /// each preceded by a space.
    pub fn html_attributes(&self) -> String {
        let mut out = String::new();
        if !self.classes.is_empty() {
            let classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
            out.push_str(&format!(" class=\"{}\"", escape_html(&classes.join(" "))));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
        }
        out
    }
}

#[cfg(test)]
impl DocumentRoot {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl StyleScope for DocumentRoot {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_owned(), value.to_owned());
    }

    fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_owned());
        } else {
            self.classes.remove(class);
        }
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_owned(), value.to_owned());
    }
}
