use std::fmt;

/// Character used to split a path string into segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `/`, as in `company/europe/finland`
    Slash,
    /// `.`, as in `catalog.schema.table`
    Dot,
    /// Any other single character, only available as a batch-wide override
    Custom(char),
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Slash => '/',
            Delimiter::Dot => '.',
            Delimiter::Custom(c) => c,
        }
    }

    /// Map a character to its delimiter, preferring the named variants
    pub fn from_char(c: char) -> Self {
        match c {
            '/' => Delimiter::Slash,
            '.' => Delimiter::Dot,
            other => Delimiter::Custom(other),
        }
    }

    /// Split `path` on this delimiter, dropping empty segments
    pub fn segments(self, path: &str) -> Vec<&str> {
        path.split(self.as_char())
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Classify a single path: `/` when the path contains one, `.` otherwise.
///
/// Detection is per path, so a batch may mix `/`- and `.`-delimited entries.
pub fn detect_delimiter(path: &str) -> Delimiter {
    if path.contains('/') {
        Delimiter::Slash
    } else {
        Delimiter::Dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_slash() {
        assert_eq!(detect_delimiter("company/europe"), Delimiter::Slash);
        assert_eq!(detect_delimiter("a.b/c"), Delimiter::Slash);
        assert_eq!(detect_delimiter("/"), Delimiter::Slash);
    }

    #[test]
    fn test_detect_falls_back_to_dot() {
        assert_eq!(detect_delimiter("catalog.schema.table"), Delimiter::Dot);
        assert_eq!(detect_delimiter("plain"), Delimiter::Dot);
        assert_eq!(detect_delimiter(""), Delimiter::Dot);
    }

    #[test]
    fn test_segments_drop_empty_parts() {
        assert_eq!(Delimiter::Slash.segments("/a//b/"), vec!["a", "b"]);
        assert_eq!(Delimiter::Dot.segments("a..b"), vec!["a", "b"]);
        assert!(Delimiter::Slash.segments("///").is_empty());
    }

    #[test]
    fn test_from_char_round_trips_named_variants() {
        assert_eq!(Delimiter::from_char('/'), Delimiter::Slash);
        assert_eq!(Delimiter::from_char('.'), Delimiter::Dot);
        assert_eq!(Delimiter::from_char('|'), Delimiter::Custom('|'));
        assert_eq!(Delimiter::Custom('|').as_char(), '|');
    }
}
