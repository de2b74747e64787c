/// Router Module Index
///
/// Routing is organized by resource rather than by required privilege: the
/// soft-deny policy means nearly every route is reachable by a guest, with
/// the per-action decision made inside the handler via the `Actor` policy.

/// Topic listing, topic view, topic creation.
pub mod topics;

/// Post CRUD nested under a topic.
pub mod posts;

/// Registration, sign-in, sign-out.
pub mod accounts;
