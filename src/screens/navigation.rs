//! Route stack shared by the screens

/// A screen location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Top airing listing
    Home,
    /// Search, carrying the `query` route parameter
    Search {
        /// Route parameter; owned by the navigation layer
        query: Option<String>,
    },
    /// One title
    Detail {
        /// MyAnimeList id
        id: u32,
    },
}

impl Route {
    /// Location string for this route ("/", "/search?query=...", "/anime/20")
    pub fn location(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Search { query: None } => "/search".to_string(),
            Self::Search { query: Some(q) } => {
                format!("/search?query={}", urlencoding::encode(q))
            }
            Self::Detail { id } => format!("/anime/{id}"),
        }
    }

    /// Whether this is a drawer (top level) route
    pub const fn is_drawer_item(&self) -> bool {
        matches!(self, Self::Home | Self::Search { .. })
    }
}

/// Navigation stack.
///
/// The bottom entry is always a drawer item (Home or Search).
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
    // Last search parameter, kept while the search screen is off the stack
    search_query: Option<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the home screen
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Home],
            search_query: None,
        }
    }

    /// The visible route
    pub fn current(&self) -> &Route {
        // The stack is never empty: `back` refuses to pop the root
        self.stack.last().unwrap_or(&Route::Home)
    }

    /// The drawer screen the user is on: the topmost Home or Search entry.
    ///
    /// A Home submit stacks Search over Home, so this is not always the root.
    pub fn drawer(&self) -> &Route {
        self.stack
            .iter()
            .rev()
            .find(|route| route.is_drawer_item())
            .unwrap_or(&Route::Home)
    }

    /// Number of entries on the stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push a route
    pub fn push(&mut self, route: Route) {
        tracing::debug!("navigate: {}", route.location());
        if let Route::Search { query: Some(q) } = &route {
            self.search_query = Some(q.clone());
        }
        self.stack.push(route);
    }

    /// Pop the visible route. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Switch drawer item: the stack collapses to that single route.
    ///
    /// Switching to Search keeps its last query parameter, since the drawer
    /// screens stay mounted.
    pub fn open_drawer(&mut self, route: Route) {
        let route = match route {
            Route::Search { query: None } => Route::Search {
                query: self.search_query.clone(),
            },
            other => other,
        };
        self.stack.clear();
        self.stack.push(route);
    }

    /// The `query` parameter of the visible search route
    pub fn query_param(&self) -> Option<&str> {
        match self.current() {
            Route::Search { query } => query.as_deref(),
            _ => None,
        }
    }

    /// Update the `query` parameter of the visible search route.
    ///
    /// Ignored when the visible route is not Search.
    pub fn set_query_param(&mut self, value: &str) {
        if let Some(Route::Search { query }) = self.stack.last_mut() {
            *query = Some(value.to_string());
            self.search_query = Some(value.to_string());
        }
    }

    /// Location string of the visible route
    pub fn location(&self) -> String {
        self.current().location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locations() {
        assert_eq!(Route::Home.location(), "/");
        assert_eq!(Route::Search { query: None }.location(), "/search");
        assert_eq!(
            Route::Search {
                query: Some("one piece".to_string())
            }
            .location(),
            "/search?query=one%20piece"
        );
        assert_eq!(Route::Detail { id: 20 }.location(), "/anime/20");
    }

    #[test]
    fn test_push_and_back() {
        let mut nav = Navigator::new();
        nav.push(Route::Search {
            query: Some("naruto".to_string()),
        });
        nav.push(Route::Detail { id: 20 });
        assert_eq!(nav.depth(), 3);
        assert_eq!(nav.query_param(), None);

        assert!(nav.back());
        assert_eq!(nav.query_param(), Some("naruto"));
        assert!(nav.back());
        assert_eq!(nav.current(), &Route::Home);
        assert!(!nav.back());
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_set_query_param_only_on_search() {
        let mut nav = Navigator::new();
        nav.set_query_param("ignored");
        assert_eq!(nav.current(), &Route::Home);

        nav.push(Route::Search { query: None });
        nav.set_query_param("bleach");
        assert_eq!(nav.location(), "/search?query=bleach");
    }

    #[test]
    fn test_drawer_follows_pushed_search() {
        let mut nav = Navigator::new();
        assert_eq!(nav.drawer(), &Route::Home);

        nav.push(Route::Search {
            query: Some("naruto".to_string()),
        });
        nav.push(Route::Detail { id: 20 });
        assert!(matches!(nav.drawer(), Route::Search { .. }));

        nav.back();
        nav.back();
        assert_eq!(nav.drawer(), &Route::Home);
    }

    #[test]
    fn test_open_drawer_collapses_stack() {
        let mut nav = Navigator::new();
        nav.push(Route::Search {
            query: Some("bebop".to_string()),
        });
        nav.push(Route::Detail { id: 1 });

        nav.open_drawer(Route::Search { query: None });
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.query_param(), Some("bebop"));

        nav.open_drawer(Route::Home);
        assert_eq!(nav.current(), &Route::Home);
        assert!(nav.current().is_drawer_item());

        // Coming back through the drawer restores the parameter
        nav.open_drawer(Route::Search { query: None });
        assert_eq!(nav.location(), "/search?query=bebop");
    }
}
