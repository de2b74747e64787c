use uuid::Uuid;

/// Actor
///
/// The resolved identity a request acts as. This is a closed set: every
/// authorization decision in the application goes through these three
/// variants rather than comparing role strings in handlers.
///
/// Resolution happens once per request in the extractor (see `auth`); from
/// then on the actor is explicit context passed into handlers and policy
/// calls, never ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// No valid session. May only read.
    Guest,
    /// Signed-in user without elevated rights.
    Member(Uuid),
    /// Signed-in administrator.
    Admin(Uuid),
}

impl Actor {
    /// Whether this actor may create a new post or topic. There is no
    /// existing record to compare ownership against, so the only rule is
    /// that guests are denied.
    pub fn can_create(&self) -> bool {
        !matches!(self, Actor::Guest)
    }

    /// Whether this actor may edit, update, or destroy a record owned by
    /// `owner`. Admins always may; members only their own; guests never.
    pub fn can_modify(&self, owner: Uuid) -> bool {
        match self {
            Actor::Admin(_) => true,
            Actor::Member(id) => *id == owner,
            Actor::Guest => false,
        }
    }

    /// The acting user's id, if signed in.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Actor::Member(id) | Actor::Admin(id) => Some(*id),
            Actor::Guest => None,
        }
    }

    /// Maps a stored role string onto a signed-in actor. Unknown role values
    /// degrade to `Member`; they cannot appear with the schema's CHECK
    /// constraint in place, but a policy layer must not panic on data.
    pub fn from_role(role: &str, user_id: Uuid) -> Actor {
        match role {
            "admin" => Actor::Admin(user_id),
            _ => Actor::Member(user_id),
        }
    }
}
