//! Fully-qualified flag names.

use std::fmt;
use std::sync::Arc;

pub const DEFAULT_DELIMITER: &str = ".";

type Renamer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Joins prefix segments and a field's flag name into the name a flag is
/// registered under.
///
/// Builders are immutable: every option returns a new builder, so one value can
/// be shared between sibling bindings while nested bindings extend it.
///
/// ```
/// use protoflags::NameBuilder;
///
/// let names = NameBuilder::new().with_prefix(["api"]).with_delimiter("-");
/// assert_eq!(names.build("port"), "api-port");
/// assert_eq!(names.nested("tls").build("cert"), "api-tls-cert");
/// ```
#[derive(Clone)]
pub struct NameBuilder {
    prefix:    Vec<String>,
    delimiter: String,
    renamer:   Option<Renamer>,
}

impl NameBuilder {
    pub fn new() -> Self {
        NameBuilder {
            prefix:    Vec::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            renamer:   None,
        }
    }

    /// Appends prefix segments. Leading and trailing `.` characters are
    /// stripped from each segment whatever the delimiter is; segments that end
    /// up empty are dropped.
    pub fn with_prefix<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for segment in segments {
            let trimmed = segment.as_ref().trim_matches('.');
            if !trimmed.is_empty() {
                self.prefix.push(trimmed.to_string());
            }
        }
        self
    }

    /// Any string is accepted, including the empty string (plain concatenation).
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    /// Applies `renamer` to every joined name.
    pub fn with_renamer<F>(mut self, renamer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.renamer = Some(Arc::new(renamer));
        self
    }

    /// A builder for the fields of a nested message bound under `segment`.
    pub fn nested(&self, segment: &str) -> Self {
        self.clone().with_prefix([segment])
    }

    pub fn build(&self, suffix: &str) -> String {
        let mut joined = String::new();
        for segment in &self.prefix {
            joined.push_str(segment);
            joined.push_str(&self.delimiter);
        }
        joined.push_str(suffix);

        match &self.renamer {
            Some(rename) => rename(&joined),
            None => joined,
        }
    }

    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl Default for NameBuilder {
    fn default() -> Self {
        NameBuilder::new()
    }
}

impl fmt::Debug for NameBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameBuilder")
            .field("prefix", &self.prefix)
            .field("delimiter", &self.delimiter)
            .field("renamer", &self.renamer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bare_builder_returns_suffix() {
        assert_eq!(NameBuilder::new().build("port"), "port");
        assert_eq!(NameBuilder::default().build(""), "");
    }

    #[rstest]
    #[case(".", "server.http.port")]
    #[case("-", "server-http-port")]
    #[case("_", "server_http_port")]
    #[case(":", "server:http:port")]
    #[case("::", "server::http::port")]
    #[case("", "serverhttpport")]
    fn joins_with_any_delimiter(#[case] delimiter: &str, #[case] expected: &str) {
        let names = NameBuilder::new()
            .with_prefix(["server", "http"])
            .with_delimiter(delimiter);
        assert_eq!(names.build("port"), expected);
    }

    #[rstest]
    #[case("-")]
    #[case(".")]
    #[case("_")]
    fn dots_are_trimmed_from_prefix_segments(#[case] delimiter: &str) {
        let names = NameBuilder::new().with_prefix([".x."]).with_delimiter(delimiter);
        assert_eq!(names.build("y"), format!("x{delimiter}y"));
    }

    #[test]
    fn empty_segments_are_dropped() {
        let names = NameBuilder::new().with_prefix(["", "..", "a"]);
        assert_eq!(names.prefix(), ["a".to_string()]);
        assert_eq!(names.build("b"), "a.b");
    }

    #[test]
    fn other_delimiters_are_not_trimmed() {
        let names = NameBuilder::new().with_prefix(["-a-"]).with_delimiter("-");
        assert_eq!(names.build("b"), "-a--b");
    }

    #[test]
    fn empty_suffix_keeps_trailing_delimiter() {
        let names = NameBuilder::new().with_prefix(["api"]).with_delimiter("-");
        assert_eq!(names.build(""), "api-");
    }

    #[test]
    fn renamer_applies_to_joined_name() {
        let names = NameBuilder::new()
            .with_prefix(["Api"])
            .with_renamer(|name| name.to_uppercase().replace('.', "_"));
        assert_eq!(names.build("port"), "API_PORT");
    }

    #[test]
    fn building_is_repeatable_and_nesting_does_not_mutate() {
        let root = NameBuilder::new().with_prefix(["root"]);
        let child = root.nested("child");
        assert_eq!(root.build("a"), root.build("a"));
        assert_eq!(root.build("a"), "root.a");
        assert_eq!(child.build("a"), "root.child.a");
    }

    #[test]
    fn unicode_passes_through() {
        let names = NameBuilder::new().with_prefix(["régión"]).with_delimiter("·");
        assert_eq!(names.build("höst"), "régión·höst");
    }
}
