use std::collections::BTreeMap;

use serde::Serialize;

use crate::RouteError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// Path parameters captured by a match, percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A route path such as `/operadoras/:cnpj`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &'static str| RouteError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        let Some(rest) = raw.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(invalid("empty segment"));
                }
                match part.strip_prefix(':') {
                    Some("") => return Err(invalid("unnamed parameter")),
                    Some(name) => {
                        let duplicate = segments.iter().any(|segment| {
                            matches!(segment, Segment::Param(existing) if existing == name)
                        });
                        if duplicate {
                            return Err(invalid("duplicate parameter"));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Static(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Param(param) if param == name))
    }

    /// Matches a normalised path. Static segments compare case-insensitively;
    /// parameters must be non-empty.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = match path.strip_prefix('/')? {
            "" => Vec::new(),
            rest => rest.split('/').collect(),
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected.eq_ignore_ascii_case(part) => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(Params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_and_param_segments() {
        let pattern = PathPattern::parse("/operadoras/:cnpj").expect("pattern");
        assert!(pattern.has_param("cnpj"));
        assert!(!pattern.has_param("id"));
        assert_eq!(pattern.as_str(), "/operadoras/:cnpj");
    }

    #[test]
    fn rejects_malformed_patterns() {
        for raw in ["operadoras", "/operadoras//x", "/a/:", "/:id/:id"] {
            assert!(
                matches!(PathPattern::parse(raw), Err(RouteError::InvalidPattern { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn root_matches_only_root() {
        let root = PathPattern::parse("/").expect("pattern");
        assert_eq!(root.matches("/"), Some(Params::default()));
        assert_eq!(root.matches("/operadoras"), None);
    }

    #[test]
    fn params_are_percent_decoded() {
        let pattern = PathPattern::parse("/operadoras/:cnpj").expect("pattern");
        let params = pattern.matches("/operadoras/12%2E345").expect("match");
        assert_eq!(params.get("cnpj"), Some("12.345"));
        let upper = pattern.matches("/OPERADORAS/1").expect("case-insensitive match");
        assert_eq!(upper.get("cnpj"), Some("1"));
        assert_eq!(pattern.matches("/operadoras/"), None);
        assert_eq!(pattern.matches("/operadoras/1/despesas"), None);
    }
}
