//! Route table: an ordered list of `(method, pattern, operation)` entries.
//!
//! Precedence is explicit. The table is sorted once at construction so that
//! exact patterns come before prefixes and longer prefixes before shorter
//! ones; entries that tie keep their declaration order. Resolution returns
//! the first entry that matches.

use axum::http::Method;

/// Every operation the content API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAllContent,
    GetSectionContent,
    GetAdminContent,
    CreateSection,
    UpdateSection,
    DeleteSection,
    CreateItem,
    UpdateItem,
    DeleteItem,
    CreateTestimonial,
    UpdateTestimonial,
    DeleteTestimonial,
    CreateFaq,
    UpdateFaq,
    DeleteFaq,
}

impl Operation {
    /// Name of the host-supplied path parameter this operation reads.
    pub fn param_name(self) -> Option<&'static str> {
        match self {
            Operation::GetSectionContent => Some("section_key"),
            Operation::UpdateSection
            | Operation::DeleteSection
            | Operation::UpdateItem
            | Operation::DeleteItem
            | Operation::UpdateTestimonial
            | Operation::DeleteTestimonial
            | Operation::UpdateFaq
            | Operation::DeleteFaq => Some("id"),
            _ => None,
        }
    }
}

/// How a route matches the normalized path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// The whole path must equal the literal.
    Exact(&'static str),
    /// The path must start with the literal; the rest is the path parameter.
    Prefix(&'static str),
}

impl Pattern {
    /// Returns `Some(param)` on a match. Exact matches have an empty param.
    fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            Pattern::Exact(literal) => (path == *literal).then_some(""),
            Pattern::Prefix(literal) => path.strip_prefix(literal),
        }
    }

    /// Sort key: exact first, then longer prefixes first.
    fn precedence(&self) -> (u8, std::cmp::Reverse<usize>) {
        match self {
            Pattern::Exact(literal) => (0, std::cmp::Reverse(literal.len())),
            Pattern::Prefix(literal) => (1, std::cmp::Reverse(literal.len())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub pattern: Pattern,
    pub operation: Operation,
}

impl Route {
    pub fn new(method: Method, pattern: Pattern, operation: Operation) -> Self {
        Self {
            method,
            pattern,
            operation,
        }
    }
}

/// Result of resolving a request against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub operation: Operation,
    /// The remainder of a prefix match. `None` for exact matches.
    pub param: Option<&'a str>,
}

/// The ordered route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Builds a table, ordering entries by pattern precedence.
    pub fn new(mut routes: Vec<Route>) -> Self {
        routes.sort_by_key(|route| route.pattern.precedence());
        Self { routes }
    }

    /// The content API routes.
    pub fn content() -> Self {
        use Operation::*;
        use Pattern::{Exact, Prefix};

        Self::new(vec![
            Route::new(Method::GET, Exact("/"), GetAllContent),
            Route::new(Method::GET, Prefix("/section/"), GetSectionContent),
            Route::new(Method::GET, Exact("/admin"), GetAdminContent),
            Route::new(Method::POST, Exact("/sections"), CreateSection),
            Route::new(Method::PUT, Prefix("/sections/"), UpdateSection),
            Route::new(Method::DELETE, Prefix("/sections/"), DeleteSection),
            Route::new(Method::POST, Exact("/items"), CreateItem),
            Route::new(Method::PUT, Prefix("/items/"), UpdateItem),
            Route::new(Method::DELETE, Prefix("/items/"), DeleteItem),
            Route::new(Method::POST, Exact("/testimonials"), CreateTestimonial),
            Route::new(Method::PUT, Prefix("/testimonials/"), UpdateTestimonial),
            Route::new(Method::DELETE, Prefix("/testimonials/"), DeleteTestimonial),
            Route::new(Method::POST, Exact("/faqs"), CreateFaq),
            Route::new(Method::PUT, Prefix("/faqs/"), UpdateFaq),
            Route::new(Method::DELETE, Prefix("/faqs/"), DeleteFaq),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the first route matching `method` and the normalized `path`.
    pub fn resolve<'a>(&self, method: &Method, path: &'a str) -> Option<RouteMatch<'a>> {
        self.routes.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            let param = route.pattern.matches(path)?;
            Some(RouteMatch {
                operation: route.operation,
                param: match route.pattern {
                    Pattern::Exact(_) => None,
                    Pattern::Prefix(_) => Some(param),
                },
            })
        })
    }
}

/// Strips the route prefix once from the start of `path`.
///
/// An empty remainder becomes `/`, and so does a lone trailing slash after
/// the prefix. Paths outside the prefix are returned unchanged.
pub fn normalize_path(path: &str, prefix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let rest = match path.strip_prefix(prefix) {
        // Only strip whole segments: "/contents" is not under "/content".
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    if rest.is_empty() {
        "/".to_string()
    } else {
        rest.to_string()
    }
}
