//! # HealthFlow (Session & Identity Core)
//!
//! `healthflow` is the session and identity core behind the HealthFlow
//! dashboard. It owns authentication state, credential verification, token
//! issuance, persisted-session restore, role-based route guarding, and the
//! staged signup flow. Pages, charts, and datasets are collaborators that
//! consume this core through read-only snapshots and never mutate it.
//!
//! ## Sessions
//!
//! At most one session is live per process. The [`auth::SessionManager`]
//! serializes `login`/`logout`/`restore` on a single writer and publishes
//! whole-state snapshots through a watch channel, so guards and pages never
//! observe a torn identity/token pair. A corrupt persisted record is
//! discarded once and treated as logged out (fail closed).
//!
//! ## Roles
//!
//! Identities carry one of `standard`, `nutritionist`, or `admin`. Role
//! checks in the [`auth::guard`] redirect silently to the landing page;
//! navigation filtering for nutritionists is advisory UI behavior, not a
//! security boundary.

pub mod auth;
pub mod cli;
