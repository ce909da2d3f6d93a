//! # Eduke
//!
//! Headless client core for the Eduke school management application.
//!
//! ## Overview
//!
//! The crate decides what a signed-in user may see and do, and keeps every
//! screen usable when the school API cannot be reached:
//!
//! - **Authorization**: roles map to a fixed permission policy
//!   ([`eduke_core::RolePermissionMap`]) queried through
//!   [`eduke_core::Authorizer`]
//! - **Gating**: navigation entries and actions are shown only when the
//!   session holds one of their permissions ([`navigation`])
//! - **Offline fallback**: every successful fetch is stored as a snapshot;
//!   a failed fetch shows the last snapshot for the same query and marks the
//!   view offline ([`eduke_cache`])
//! - **View controllers**: dashboard, gradebook, timetable and teacher
//!   dashboard ([`views`])
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── eduke-core/      # Permissions, roles, authorizer, gating, errors
//! ├── eduke-config/    # API and session configuration
//! ├── eduke-models/    # Payloads exchanged with the API
//! ├── eduke-cache/     # Snapshot stores, view state, fetch with fallback
//! └── eduke-client/    # SchoolApi trait and its HTTP implementation
//! src/
//! ├── logging.rs       # Tracing subscriber setup
//! ├── navigation.rs    # Gated navigation entries
//! ├── state.rs         # Shared application state
//! └── views/           # View controllers
//! ```
//!
//! ## Role Scopes
//!
//! ```text
//! superadmin        platform-wide, every permission
//! parent_org_admin  tenant-wide (the school owner)
//! branch_admin      pinned to one branch
//! staff             pinned to one branch, teaching permissions
//! ```
//!
//! Branch-scoped sessions with an assigned branch always query that branch;
//! the dashboard ignores attempts to change it.
//!
//! ## Configuration
//!
//! Environment variables (a `.env` file is loaded by the binary):
//!
//! | Variable | Default |
//! |----------|---------|
//! | `EDUKE_API_URL` | `https://api.eduke.com` |
//! | `EDUKE_API_TIMEOUT_SECS` | `15` |
//! | `EDUKE_API_TOKEN` | unset |
//! | `EDUKE_SESSION_ROLE` | unset (unauthenticated) |
//! | `EDUKE_SESSION_USER_ID` | `0` |
//! | `EDUKE_SESSION_BRANCH_ID` | unset |
//! | `EDUKE_SESSION_NAME` | empty |
//! | `CACHE_BACKEND` | `file` |
//! | `CACHE_PATH` | `storage/snapshots.json` |
//! | `REDIS_URL` | `redis://127.0.0.1:6379` |
//! | `CACHE_PREFIX` | `eduke` |
//! | `LOG_LEVEL` | `info` |
//! | `LOG_DIR` | unset (console only) |

pub mod logging;
pub mod navigation;
pub mod state;
pub mod views;

pub use navigation::{NAVIGATION, NavItem, navigation_for, navigation_for_role};
pub use state::{AppState, init_app_state};
