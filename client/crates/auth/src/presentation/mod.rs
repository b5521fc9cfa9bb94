//! Presentation Layer
//!
//! Route guard, navigation, and view-facing helpers.

pub mod context;
pub mod navigator;
pub mod notice;
pub mod route_guard;
pub mod view;

pub use context::AuthContext;
pub use navigator::Navigator;
pub use notice::Notice;
pub use route_guard::{
    AUTH_ENTRY, DEFAULT_LANDING, Route, RouteDecision, View, auth_route, decide, protected_route,
};
pub use view::{NAV_ITEMS, NavItem, UserBadge};
