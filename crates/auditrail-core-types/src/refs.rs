//! Reference types identifying audited objects and responsible actors
//!
//! An [`ObjectRef`] survives the deletion of the object it points to: the
//! kind discriminator and identifier are copied into every log entry so the
//! trail stays queryable after the fact. [`ActorContext`] is the "who"
//! attached to a change; every field is optional because system and batch
//! operations have no authenticated actor.

use crate::correlation::RequestContext;
use serde::{Deserialize, Serialize};

/// A (kind, identifier) pair naming an audited object
///
/// `kind` is the type discriminator of the surrounding system (table name,
/// entity name, ...); `id` is the object's identifier rendered as a string
/// so that integer, UUID, and composite keys all fit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: String,
    pub id: String,
}

impl ObjectRef {
    /// Create a reference from a kind discriminator and an identifier
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Contextual metadata about who made a change, and from where
///
/// Supplied by the integrating system (e.g. request middleware). The
/// `request` context is used only for structured-log correlation; it is not
/// persisted on entries.
#[derive(Debug, Clone, Default)]
pub struct ActorContext {
    /// Identifier of the responsible actor, if authenticated
    pub actor_id: Option<String>,
    /// Display representation of the actor, resilient to later deletion
    pub actor_repr: Option<String>,
    /// Origin network address
    pub remote_addr: Option<String>,
    /// Client descriptor (e.g. user-agent string)
    pub client: Option<String>,
    /// Request correlation for structured logs
    pub request: Option<RequestContext>,
}

impl ActorContext {
    /// An anonymous context (system/batch operation, no actor)
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated actor
    pub fn for_actor(actor_id: impl Into<String>, actor_repr: impl Into<String>) -> Self {
        Self {
            actor_id: Some(actor_id.into()),
            actor_repr: Some(actor_repr.into()),
            ..Self::default()
        }
    }

    /// Attach an origin address
    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    /// Attach a client descriptor
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    /// Attach request correlation
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = Some(request);
        self
    }
}
