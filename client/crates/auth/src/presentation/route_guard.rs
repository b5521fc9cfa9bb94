//! Route Guard
//!
//! Pure decision functions mapping the session status and a requested
//! route onto what the shell should do.

use std::fmt;

use crate::domain::entity::session::{Session, SessionStatus};

/// Entry route for signed-out users
pub const AUTH_ENTRY: &str = "/auth";

/// Landing route after sign-in
pub const DEFAULT_LANDING: &str = "/dashboard";

// ============================================================================
// View
// ============================================================================

/// Screen rendered for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Auth,
    Dashboard,
    Notes,
    Courses,
    Features,
    HowItWorks,
    Settings,
    NotFound,
}

impl View {
    /// Screen title
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Auth => "Sign In",
            Self::Dashboard => "Dashboard",
            Self::Notes => "Notes",
            Self::Courses => "Courses",
            Self::Features => "Features",
            Self::HowItWorks => "How It Works",
            Self::Settings => "Settings",
            Self::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// Route
// ============================================================================

/// Route table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`, always forwarded to the auth entry
    Root,
    /// Reachable only while signed out
    Auth,
    /// Reachable only while signed in
    Protected(View),
    /// Unknown path, rendered for everyone
    NotFound,
}

const PROTECTED_ROUTES: &[(&str, View)] = &[
    ("/dashboard", View::Dashboard),
    ("/notes", View::Notes),
    ("/courses", View::Courses),
    ("/features", View::Features),
    ("/how-it-works", View::HowItWorks),
    ("/settings", View::Settings),
];

impl Route {
    /// Look up a path; query string, fragment and trailing `/` are ignored
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        if path == "/" {
            return Self::Root;
        }
        if path == AUTH_ENTRY {
            return Self::Auth;
        }
        PROTECTED_ROUTES
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, view)| Self::Protected(*view))
            .unwrap_or(Self::NotFound)
    }
}

// ============================================================================
// Decisions
// ============================================================================

/// Outcome of evaluating a guarded route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Startup resolution pending
    Loading,
    /// Show the screen
    Render(View),
    /// Go elsewhere; `replace` swaps the current history entry
    Redirect { to: &'static str, replace: bool },
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("loading"),
            Self::Render(view) => write!(f, "render {view}"),
            Self::Redirect { to, replace: true } => write!(f, "redirect {to} (replace)"),
            Self::Redirect { to, replace: false } => write!(f, "redirect {to}"),
        }
    }
}

/// Guard for screens that need a signed-in user
pub fn protected_route(session: &Session, target: View) -> RouteDecision {
    match session.status {
        SessionStatus::Initializing => RouteDecision::Loading,
        SessionStatus::Unauthenticated => RouteDecision::Redirect {
            to: AUTH_ENTRY,
            replace: true,
        },
        SessionStatus::Authenticated => RouteDecision::Render(target),
    }
}

/// Guard for screens that only make sense while signed out
pub fn auth_route(session: &Session, target: View) -> RouteDecision {
    match session.status {
        SessionStatus::Initializing => RouteDecision::Loading,
        SessionStatus::Authenticated => RouteDecision::Redirect {
            to: DEFAULT_LANDING,
            replace: true,
        },
        SessionStatus::Unauthenticated => RouteDecision::Render(target),
    }
}

/// Evaluate a route from the table against the session
pub fn decide(route: Route, session: &Session) -> RouteDecision {
    match route {
        Route::Root => RouteDecision::Redirect {
            to: AUTH_ENTRY,
            replace: true,
        },
        Route::Auth => auth_route(session, View::Auth),
        Route::Protected(view) => protected_route(session, view),
        Route::NotFound => RouteDecision::Render(View::NotFound),
    }
}
