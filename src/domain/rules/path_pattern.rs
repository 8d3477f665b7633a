//! Ant-style path patterns (`?`, `*`, `**`)

use regex::Regex;

use crate::domain::error::MatcherError;

/// Compiled path pattern
///
/// - `?` matches one character within a segment
/// - `*` matches zero or more characters within a segment
/// - `/**` matches zero or more whole segments
/// - `**` inside a segment behaves like `*`
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
}

impl PathPattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self, MatcherError> {
        let pattern = pattern.into();

        if pattern.is_empty() {
            return Err(MatcherError::invalid_pattern(pattern, "pattern must not be empty"));
        }
        if !pattern.starts_with('/') {
            return Err(MatcherError::invalid_pattern(pattern, "pattern must start with '/'"));
        }

        let regex = Regex::new(&to_regex(&pattern))
            .map_err(|e| MatcherError::invalid_pattern(pattern.clone(), e.to_string()))?;

        Ok(Self { regex })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

fn to_regex(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut regex = String::with_capacity(pattern.len() * 2);
    regex.push('^');

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '/' if is_double_wildcard_segment(&chars, i) => {
                if i + 3 == chars.len() {
                    regex.push_str("(?:/.*)?");
                } else {
                    regex.push_str("(?:/[^/]+)*");
                }
                i += 3;
            }
            '*' => {
                regex.push_str("[^/]*");
                i += 1;
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
            }
            '?' => {
                regex.push_str("[^/]");
                i += 1;
            }
            c => {
                let mut buf = [0u8; 4];
                regex.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                i += 1;
            }
        }
    }

    regex.push('$');
    regex
}

/// `/**` followed by the end of the pattern or another `/`
fn is_double_wildcard_segment(chars: &[char], slash: usize) -> bool {
    chars.get(slash + 1) == Some(&'*')
        && chars.get(slash + 2) == Some(&'*')
        && matches!(chars.get(slash + 3), None | Some('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(p: &str) -> PathPattern {
        PathPattern::new(p).unwrap()
    }

    #[test]
    fn test_literal_pattern() {
        let p = pattern("/actuator/health");
        assert!(p.matches("/actuator/health"));
        assert!(!p.matches("/actuator/health/db"));
        assert!(!p.matches("/actuator/healthz"));
    }

    #[test]
    fn test_trailing_double_wildcard() {
        let p = pattern("/css/**");
        assert!(p.matches("/css"));
        assert!(p.matches("/css/site.css"));
        assert!(p.matches("/css/themes/dark/site.css"));
        assert!(!p.matches("/cssx/site.css"));
        assert!(!p.matches("/js/app.js"));
    }

    #[test]
    fn test_inner_double_wildcard() {
        let p = pattern("/api/**/items");
        assert!(p.matches("/api/items"));
        assert!(p.matches("/api/v1/items"));
        assert!(p.matches("/api/v1/shop/items"));
        assert!(!p.matches("/api/v1/items/1"));
    }

    #[test]
    fn test_single_wildcard_stays_in_segment() {
        let p = pattern("/*/icon-*");
        assert!(p.matches("/static/icon-32.png"));
        assert!(!p.matches("/a/b/icon-32.png"));

        let favicon = pattern("/favicon.*");
        assert!(favicon.matches("/favicon.ico"));
        assert!(!favicon.matches("/faviconXico"));
    }

    #[test]
    fn test_double_wildcard_inside_segment_stays_in_segment() {
        let p = pattern("/api/**.json");
        assert!(p.matches("/api/data.json"));
        assert!(p.matches("/api/.json"));
        assert!(!p.matches("/api/v1/data.json"));

        let prefix = pattern("/assets/app**");
        assert!(prefix.matches("/assets/app-1.js"));
        assert!(!prefix.matches("/assets/app/1.js"));
    }

    #[test]
    fn test_question_mark() {
        let p = pattern("/v?/models");
        assert!(p.matches("/v1/models"));
        assert!(!p.matches("/v10/models"));
        assert!(!p.matches("/v/models"));
    }

    #[test]
    fn test_regex_characters_are_literal() {
        let p = pattern("/files/(draft)+.txt");
        assert!(p.matches("/files/(draft)+.txt"));
        assert!(!p.matches("/files/draft.txt"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            PathPattern::new(""),
            Err(MatcherError::InvalidPattern { .. })
        ));
        assert!(matches!(
            PathPattern::new("css/**"),
            Err(MatcherError::InvalidPattern { .. })
        ));
    }
}
