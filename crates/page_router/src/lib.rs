//! Client-side routing: maps a URL path to exactly one page of the panel.

use serde::Serialize;
use shared::domain::Cnpj;
use thiserror::Error;
use tracing::debug;

mod navigator;
mod pattern;

pub use navigator::Navigator;
pub use pattern::{Params, PathPattern};

pub const OPERATORS_ROUTE: &str = "/operadoras";
pub const OPERATOR_DETAIL_ROUTE: &str = "/operadoras/:cnpj";
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
    #[error("redirect target '{target}' must be an absolute path")]
    InvalidRedirect { target: String },
    #[error("route '{pattern}' renders {page:?} but does not forward its props")]
    PropsNotForwarded { pattern: String, page: PageKind },
    #[error("route '{pattern}' does not provide '{param}' required by {page:?}")]
    MissingParam {
        pattern: String,
        param: &'static str,
        page: PageKind,
    },
    #[error("too many redirects resolving '{path}'")]
    RedirectLoop { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    OperatorList,
    OperatorDetail,
}

impl PageKind {
    /// Inputs the page must receive as typed props.
    pub fn required_inputs(self) -> &'static [&'static str] {
        match self {
            Self::OperatorList => &[],
            Self::OperatorDetail => &["cnpj"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorDetailProps {
    pub cnpj: Cnpj,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    OperatorList,
    OperatorDetail(OperatorDetailProps),
    NotFound { path: String },
}

impl Page {
    fn build(
        kind: PageKind,
        pattern: &PathPattern,
        props: Option<&Params>,
    ) -> Result<Self, RouteError> {
        let require = |param: &'static str| {
            props
                .and_then(|props| props.get(param))
                .map(str::to_string)
                .ok_or_else(|| RouteError::MissingParam {
                    pattern: pattern.as_str().to_string(),
                    param,
                    page: kind,
                })
        };

        Ok(match kind {
            PageKind::OperatorList => Self::OperatorList,
            PageKind::OperatorDetail => Self::OperatorDetail(OperatorDetailProps {
                cnpj: Cnpj::new(require("cnpj")?),
            }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Redirect(String),
    Page(PageKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pattern: PathPattern,
    target: RouteTarget,
    forward_props: bool,
}

impl RouteDef {
    pub fn page(pattern: &str, kind: PageKind) -> Result<Self, RouteError> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            target: RouteTarget::Page(kind),
            forward_props: false,
        })
    }

    pub fn redirect(pattern: &str, target: &str) -> Result<Self, RouteError> {
        if !target.starts_with('/') {
            return Err(RouteError::InvalidRedirect {
                target: target.to_string(),
            });
        }
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            target: RouteTarget::Redirect(target.to_string()),
            forward_props: false,
        })
    }

    /// Passes the captured path parameters to the page as typed props.
    pub fn with_props(mut self) -> Self {
        self.forward_props = true;
        self
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    fn validate(&self) -> Result<(), RouteError> {
        let RouteTarget::Page(kind) = self.target else {
            return Ok(());
        };
        let required = kind.required_inputs();
        if !required.is_empty() && !self.forward_props {
            return Err(RouteError::PropsNotForwarded {
                pattern: self.pattern.as_str().to_string(),
                page: kind,
            });
        }
        match required
            .iter()
            .copied()
            .find(|param| !self.pattern.has_param(param))
        {
            Some(param) => Err(RouteError::MissingParam {
                pattern: self.pattern.as_str().to_string(),
                param,
                page: kind,
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// Final path after redirects.
    pub path: String,
    /// Pattern of the matched route, `None` for the not-found page.
    pub matched: Option<String>,
    pub params: Params,
    pub page: Page,
    /// Path originally requested when a redirect was followed.
    pub redirected_from: Option<String>,
}

/// Ordered route definitions; the first matching entry wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Result<Self, RouteError> {
        for route in &routes {
            route.validate()?;
        }
        Ok(Self { routes })
    }

    /// `/` redirects to the listing, `/operadoras` lists operators and
    /// `/operadoras/:cnpj` shows one operator.
    pub fn standard() -> Result<Self, RouteError> {
        Self::new(vec![
            RouteDef::redirect("/", OPERATORS_ROUTE)?,
            RouteDef::page(OPERATORS_ROUTE, PageKind::OperatorList)?,
            RouteDef::page(OPERATOR_DETAIL_ROUTE, PageKind::OperatorDetail)?.with_props(),
        ])
    }

    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, RouteError> {
        let mut current = normalize_path(path);
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let Some((route, params)) = self
                .routes
                .iter()
                .find_map(|route| route.pattern.matches(&current).map(|params| (route, params)))
            else {
                debug!(path = %current, "no route matched");
                return Ok(ResolvedRoute {
                    page: Page::NotFound {
                        path: current.clone(),
                    },
                    path: current,
                    matched: None,
                    params: Params::default(),
                    redirected_from,
                });
            };

            match &route.target {
                RouteTarget::Redirect(target) => {
                    debug!(from = %current, to = %target, "following redirect");
                    redirected_from.get_or_insert_with(|| current.clone());
                    current = normalize_path(target);
                }
                RouteTarget::Page(kind) => {
                    let props = route.forward_props.then_some(&params);
                    let page = Page::build(*kind, &route.pattern, props)?;
                    debug!(path = %current, pattern = route.pattern.as_str(), "route resolved");
                    return Ok(ResolvedRoute {
                        path: current,
                        matched: Some(route.pattern.as_str().to_string()),
                        params,
                        page,
                        redirected_from,
                    });
                }
            }
        }

        Err(RouteError::RedirectLoop {
            path: path.to_string(),
        })
    }
}

/// Drops query string and fragment, guarantees a leading slash and removes
/// a single trailing slash.
pub fn normalize_path(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
