//! Session context and route guard.
//!
//! The acting user is an explicit [`SessionContext`] handed to whatever
//! needs it, never an ambient flag.

use crate::error::AccessDenied;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Player booking courts
    User,
    /// Facility owner managing venues
    VenueOwner,
    /// Platform administrator
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::VenueOwner => "venue owner",
            Self::Admin => "admin",
        })
    }
}

/// A signed-in user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account id
    pub user_id: UserId,
    /// Login email
    pub email: String,
    /// Account role
    pub role: UserRole,
}

impl Session {
    /// New session for a fresh user id
    #[must_use]
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: UserId::new(),
            email: email.into(),
            role,
        }
    }
}

/// Owner console pages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OwnerPage {
    /// `/owner/dashboard`
    Dashboard,
    /// `/owner/facilities`
    Facilities,
    /// `/owner/bookings`
    Bookings,
    /// `/owner/settings`
    Settings,
}

/// Admin console pages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdminPage {
    /// `/admin/dashboard`
    Dashboard,
    /// `/admin/facilities`
    Facilities,
    /// `/admin/users`
    Users,
    /// `/admin/settings`
    Settings,
}

/// Application routes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` (sign-in page)
    Landing,
    /// `/login`
    Login,
    /// `/signup`
    Signup,
    /// `/home`
    Home,
    /// `/venues`
    Venues,
    /// `/dashboard`
    Dashboard,
    /// `/bookings`
    Bookings,
    /// `/profile`
    Profile,
    /// `/book`
    Book,
    /// `/owner/*`
    Owner(OwnerPage),
    /// `/admin/*`
    Admin(AdminPage),
    /// Anything else
    NotFound,
}

/// Who may open a route
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Public,
    SignedIn,
    Owner,
    Admin,
}

impl Route {
    /// Resolve a path; unknown paths become [`Route::NotFound`]
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Landing,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/home" => Self::Home,
            "/venues" => Self::Venues,
            "/dashboard" => Self::Dashboard,
            "/bookings" => Self::Bookings,
            "/profile" => Self::Profile,
            "/book" => Self::Book,
            "/owner/dashboard" => Self::Owner(OwnerPage::Dashboard),
            "/owner/facilities" => Self::Owner(OwnerPage::Facilities),
            "/owner/bookings" => Self::Owner(OwnerPage::Bookings),
            "/owner/settings" => Self::Owner(OwnerPage::Settings),
            "/admin/dashboard" => Self::Admin(AdminPage::Dashboard),
            "/admin/facilities" => Self::Admin(AdminPage::Facilities),
            "/admin/users" => Self::Admin(AdminPage::Users),
            "/admin/settings" => Self::Admin(AdminPage::Settings),
            _ => Self::NotFound,
        }
    }

    /// Canonical path
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Home => "/home",
            Self::Venues => "/venues",
            Self::Dashboard => "/dashboard",
            Self::Bookings => "/bookings",
            Self::Profile => "/profile",
            Self::Book => "/book",
            Self::Owner(OwnerPage::Dashboard) => "/owner/dashboard",
            Self::Owner(OwnerPage::Facilities) => "/owner/facilities",
            Self::Owner(OwnerPage::Bookings) => "/owner/bookings",
            Self::Owner(OwnerPage::Settings) => "/owner/settings",
            Self::Admin(AdminPage::Dashboard) => "/admin/dashboard",
            Self::Admin(AdminPage::Facilities) => "/admin/facilities",
            Self::Admin(AdminPage::Users) => "/admin/users",
            Self::Admin(AdminPage::Settings) => "/admin/settings",
            Self::NotFound => "/404",
        }
    }

    const fn access(self) -> Access {
        match self {
            Self::Landing | Self::Login | Self::Signup | Self::NotFound => Access::Public,
            Self::Home
            | Self::Venues
            | Self::Dashboard
            | Self::Bookings
            | Self::Profile
            | Self::Book => Access::SignedIn,
            Self::Owner(_) => Access::Owner,
            Self::Admin(_) => Access::Admin,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The acting user, if any
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext(Option<Session>);

impl SessionContext {
    /// Wrap an optional session
    #[must_use]
    pub const fn new(session: Option<Session>) -> Self {
        Self(session)
    }

    /// No one signed in
    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }

    /// Someone signed in
    #[must_use]
    pub const fn signed_in(session: Session) -> Self {
        Self(Some(session))
    }

    /// The session, if any
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }

    /// Whether someone is signed in
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.0.is_some()
    }

    /// Decide whether this context may open `route`
    ///
    /// Admins may open owner pages; owners may not open admin pages.
    ///
    /// # Errors
    ///
    /// [`AccessDenied::NotLoggedIn`] for guarded routes without a session,
    /// [`AccessDenied::Forbidden`] when the role is insufficient.
    pub fn authorize(&self, route: Route) -> Result<(), AccessDenied> {
        let access = route.access();
        if access == Access::Public {
            return Ok(());
        }

        let Some(session) = &self.0 else {
            return Err(AccessDenied::NotLoggedIn { route });
        };

        let allowed = match access {
            Access::Public | Access::SignedIn => true,
            Access::Owner => matches!(session.role, UserRole::VenueOwner | UserRole::Admin),
            Access::Admin => session.role == UserRole::Admin,
        };

        if allowed {
            Ok(())
        } else {
            Err(AccessDenied::Forbidden {
                route,
                role: session.role,
            })
        }
    }

    /// Where to send this context after sign-in (or to sign in)
    #[must_use]
    pub const fn home_route(&self) -> Route {
        match &self.0 {
            None => Route::Login,
            Some(Session {
                role: UserRole::User,
                ..
            }) => Route::Dashboard,
            Some(Session {
                role: UserRole::VenueOwner,
                ..
            }) => Route::Owner(OwnerPage::Dashboard),
            Some(Session {
                role: UserRole::Admin,
                ..
            }) => Route::Admin(AdminPage::Dashboard),
        }
    }
}
