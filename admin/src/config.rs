//! Configuration for the admin console.
//!
//! Loads configuration from environment variables with sensible defaults.

use marquee_core::collection::CollectionName;
use marquee_core::routing::RoutePath;
use serde::{Deserialize, Serialize};
use std::env;

/// Admin console configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Record feed configuration
    pub collection: CollectionConfig,
    /// Route paths for navigation targets
    pub paths: PathsConfig,
    /// Events table view configuration
    pub view: ViewConfig,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Record feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Name of the mirrored collection
    pub name: CollectionName,
    /// Field the feed orders records by
    pub order_by: String,
}

/// Route paths used by the navigation header and the events table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Landing page
    pub home: RoutePath,
    /// About page
    pub about: RoutePath,
    /// Contact page
    pub contact: RoutePath,
    /// Sign-in page, also the target after a completed sign-out
    pub login: RoutePath,
    /// Admin dashboard, linked for admins only
    pub dashboard: RoutePath,
    /// Event creation form
    pub event_create: RoutePath,
    /// Event update form base; the record id is appended per event
    pub event_update: RoutePath,
}

/// Events table view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Rows per page
    pub page_size: usize,
    /// Whether the text filter ignores case
    pub case_insensitive_filter: bool,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            collection: CollectionConfig {
                name: CollectionName::new(
                    env::var("MARQUEE_EVENTS_COLLECTION").unwrap_or_else(|_| "events".to_string()),
                ),
                order_by: env::var("MARQUEE_EVENTS_ORDER_BY")
                    .unwrap_or_else(|_| "title".to_string()),
            },
            paths: PathsConfig {
                home: RoutePath::new(
                    env::var("MARQUEE_HOME_PATH").unwrap_or_else(|_| "/".to_string()),
                ),
                about: RoutePath::new(
                    env::var("MARQUEE_ABOUT_PATH").unwrap_or_else(|_| "/about".to_string()),
                ),
                contact: RoutePath::new(
                    env::var("MARQUEE_CONTACT_PATH").unwrap_or_else(|_| "/contact".to_string()),
                ),
                login: RoutePath::new(
                    env::var("MARQUEE_LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
                ),
                dashboard: RoutePath::new(
                    env::var("MARQUEE_DASHBOARD_PATH")
                        .unwrap_or_else(|_| "/admin/dashboard".to_string()),
                ),
                event_create: RoutePath::new(
                    env::var("MARQUEE_EVENT_CREATE_PATH")
                        .unwrap_or_else(|_| "/admin/events/create".to_string()),
                ),
                event_update: RoutePath::new(
                    env::var("MARQUEE_EVENT_UPDATE_PATH")
                        .unwrap_or_else(|_| "/admin/events/update".to_string()),
                ),
            },
            view: ViewConfig {
                page_size: env::var("MARQUEE_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                case_insensitive_filter: env::var("MARQUEE_FILTER_IGNORE_CASE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(true),
            },
            shutdown_timeout: env::var("MARQUEE_SHUTDOWN_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            collection: CollectionConfig {
                name: CollectionName::new("events"),
                order_by: "title".to_string(),
            },
            paths: PathsConfig {
                home: RoutePath::new("/"),
                about: RoutePath::new("/about"),
                contact: RoutePath::new("/contact"),
                login: RoutePath::new("/login"),
                dashboard: RoutePath::new("/admin/dashboard"),
                event_create: RoutePath::new("/admin/events/create"),
                event_update: RoutePath::new("/admin/events/update"),
            },
            view: ViewConfig {
                page_size: 10,
                case_insensitive_filter: true,
            },
            shutdown_timeout: 5,
        }
    }
}
