//! Robots.txt parser implementation
//!
//! This module collects Allow and Disallow directives using the robotstxt
//! crate's parse callbacks.

use robotstxt::{parse_robotstxt, RobotsParseHandler};

/// A single Allow or Disallow directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsRule {
    /// Absolute path prefix, e.g. `/private/`
    pub path: String,
    pub allowed: bool,
}

/// Parsed robots.txt policy
///
/// Rules from every user-agent group are collected; the crawler identifies
/// itself but does not expect site-specific groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsPolicy {
    rules: Vec<RobotsRule>,
}

impl RobotsPolicy {
    /// Creates a RobotsPolicy from raw robots.txt content
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    ///
    /// # Returns
    ///
    /// A RobotsPolicy that can be used to check directory permissions
    pub fn from_content(content: &str) -> Self {
        let mut collector = RuleCollector::default();
        parse_robotstxt(content, &mut collector);
        Self {
            rules: collector.rules,
        }
    }

    /// Creates a permissive policy that allows everything
    ///
    /// This is used as the default when robots.txt cannot be fetched.
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn disallowed(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|rule| !rule.allowed)
            .map(|rule| rule.path.as_str())
    }

    pub fn allowed(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|rule| rule.allowed)
            .map(|rule| rule.path.as_str())
    }

    /// Checks whether a path may be fetched
    ///
    /// The longest rule whose path is a prefix of `path` decides. An Allow
    /// rule wins a tie against a Disallow rule of the same length. A path no
    /// rule matches is allowed.
    ///
    /// # Arguments
    ///
    /// * `path` - The directory path to check (e.g., "/private/")
    pub fn is_allowed(&self, path: &str) -> bool {
        let mut best: Option<&RobotsRule> = None;

        for rule in &self.rules {
            if !path.starts_with(&rule.path) {
                continue;
            }
            best = match best {
                None => Some(rule),
                Some(current) if rule.path.len() > current.path.len() => Some(rule),
                Some(current) if rule.path.len() == current.path.len() && rule.allowed => {
                    Some(rule)
                }
                keep => keep,
            };
        }

        best.map_or(true, |rule| rule.allowed)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Default)]
struct RuleCollector {
    rules: Vec<RobotsRule>,
}

impl RuleCollector {
    fn push(&mut self, value: &str, allowed: bool) {
        let path = value.trim();
        // An empty Disallow means "no restriction"
        if path.is_empty() {
            return;
        }

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        self.rules.push(RobotsRule { path, allowed });
    }
}

impl RobotsParseHandler for RuleCollector {
    fn handle_robots_start(&mut self) {}

    fn handle_robots_end(&mut self) {}

    fn handle_user_agent(&mut self, _line_num: u32, _user_agent: &str) {}

    fn handle_allow(&mut self, _line_num: u32, value: &str) {
        self.push(value, true);
    }

    fn handle_disallow(&mut self, _line_num: u32, value: &str) {
        self.push(value, false);
    }

    fn handle_sitemap(&mut self, _line_num: u32, _value: &str) {}

    fn handle_unknown_action(&mut self, _line_num: u32, _action: &str, _value: &str) {}
}
