//! View Models
//!
//! Sidebar navigation and the signed-in user badge.

use serde::Serialize;

use crate::domain::entity::session::Session;

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

impl NavItem {
    /// Whether this entry is highlighted for `path`
    pub fn is_active(&self, path: &str) -> bool {
        path == self.path
    }
}

/// Sidebar entries, in display order
pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem {
        label: "Dashboard",
        path: "/dashboard",
    },
    NavItem {
        label: "Courses",
        path: "/courses",
    },
    NavItem {
        label: "Notes",
        path: "/notes",
    },
    NavItem {
        label: "Features",
        path: "/features",
    },
    NavItem {
        label: "How It Works",
        path: "/how-it-works",
    },
    NavItem {
        label: "Settings",
        path: "/settings",
    },
];

/// Top bar user badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadge {
    pub display_name: String,
    pub initial: String,
    pub email: Option<String>,
}

impl UserBadge {
    pub fn from_session(session: &Session) -> Self {
        let name = session
            .user
            .as_ref()
            .map(|u| u.name.trim())
            .filter(|n| !n.is_empty());

        let initial = name
            .and_then(|n| n.chars().next())
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_else(|| "U".to_string());

        Self {
            display_name: name.unwrap_or("User").to_string(),
            initial,
            email: session.user.as_ref().map(|u| u.email.clone()),
        }
    }
}
