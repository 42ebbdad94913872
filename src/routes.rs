use std::fmt;

/// Pages reachable by path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Upload,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Landing, Route::Login, Route::Upload];

    /// Resolve a request path, ignoring query, fragment and a trailing slash
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Upload => "/upload",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Landing",
            Route::Login => "Login",
            Route::Upload => "Upload New Lesson",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.path(), self.title())
    }
}
