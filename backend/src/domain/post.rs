//! Post aggregate and its embedded Reaction subdocuments.
//!
//! Reactions are value types owned exclusively by one Post: they live inside
//! the post's ordered reaction sequence, have no independent lifecycle, and
//! are addressed only by identifier within that sequence. Reaction
//! identifiers are unique within a single post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ident::EntityId;
use crate::domain::validation::{validate_author_handle, validate_body, FieldViolation};

/// A short text entry authored by a Person.
///
/// `author_handle` is a snapshot captured at creation time, not a live
/// reference; the owning Person is found through its post-reference set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: EntityId,
    pub body: String,
    pub author_handle: String,
    pub created_at: DateTime<Utc>,
    pub reactions: Vec<Reaction>,
}

impl Post {
    /// Derived attribute: the length of the reaction sequence.
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Look up an embedded reaction by identifier.
    pub fn reaction(&self, id: &EntityId) -> Option<&Reaction> {
        self.reactions.iter().find(|reaction| reaction.id == *id)
    }
}

/// A short text response embedded within a Post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: EntityId,
    pub body: String,
    pub author_handle: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Build a reaction with a freshly generated identifier and timestamp,
    /// running the field constraints over the draft.
    pub fn new(draft: ReactionDraft) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let body = validate_body("body", &draft.body)
            .map_err(|violation| violations.push(violation))
            .ok();
        let author_handle = validate_author_handle("authorHandle", &draft.author_handle)
            .map_err(|violation| violations.push(violation))
            .ok();
        match (body, author_handle) {
            (Some(body), Some(author_handle)) => Ok(Self {
                id: EntityId::generate(),
                body,
                author_handle,
                created_at: Utc::now(),
            }),
            _ => Err(violations),
        }
    }
}

/// Input payload for appending a reaction to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionDraft {
    pub body: String,
    pub author_handle: String,
}

/// Input payload for creating a Post. The store assigns the identifier and
/// creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub body: String,
    pub author_handle: String,
}

impl PostDraft {
    /// Run the store's field constraints, collecting every violation.
    pub fn normalized(self) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let body = validate_body("body", &self.body)
            .map_err(|violation| violations.push(violation))
            .ok();
        let author_handle = validate_author_handle("authorHandle", &self.author_handle)
            .map_err(|violation| violations.push(violation))
            .ok();
        match (body, author_handle) {
            (Some(body), Some(author_handle)) => Ok(Self {
                body,
                author_handle,
            }),
            _ => Err(violations),
        }
    }
}

/// Atomic field-level update for a Post. Only the body is patchable; the
/// author handle is an immutable snapshot and the timestamp is
/// store-assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub body: Option<String>,
}

impl PostPatch {
    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }

    /// Run the store's field constraints over the fields present in the
    /// patch.
    pub fn normalized(self) -> Result<Self, Vec<FieldViolation>> {
        match self.body {
            Some(body) => validate_body("body", &body)
                .map(|body| Self { body: Some(body) })
                .map_err(|violation| vec![violation]),
            None => Ok(Self { body: None }),
        }
    }
}

/// Outcome of a post deletion. `owner_unlinked` is false when no owning
/// Person referenced the post, so callers can tell a dangling deletion from
/// full success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDeletion {
    pub post_id: EntityId,
    pub owner_unlinked: bool,
}

/// Result of pulling a reaction out of a post's sequence: the updated post
/// plus whether any reaction actually matched.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRemoval {
    pub post: Post,
    pub removed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{FieldViolation, BODY_MAX};

    #[test]
    fn reactions_get_fresh_identifiers_and_timestamps() {
        let draft = ReactionDraft {
            body: "nice".to_owned(),
            author_handle: "bob".to_owned(),
        };
        let first = Reaction::new(draft.clone()).expect("valid reaction");
        let second = Reaction::new(draft).expect("valid reaction");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn reaction_drafts_collect_violations_for_both_fields() {
        let violations = Reaction::new(ReactionDraft {
            body: String::new(),
            author_handle: "  ".to_owned(),
        })
        .expect_err("invalid reaction");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field(), "body");
        assert_eq!(violations[1].field(), "authorHandle");
    }

    #[test]
    fn post_drafts_enforce_the_body_bounds() {
        let oversized = PostDraft {
            body: "a".repeat(BODY_MAX + 1),
            author_handle: "ada".to_owned(),
        };
        let violations = oversized.normalized().expect_err("too long");
        assert_eq!(
            violations,
            vec![FieldViolation::Length {
                field: "body",
                min: 1,
                max: BODY_MAX
            }]
        );
    }

    #[test]
    fn empty_patches_normalise_to_no_change() {
        let patch = PostPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.clone().normalized(), Ok(patch));
    }

    #[test]
    fn reaction_lookup_matches_by_identifier() {
        let reaction = Reaction::new(ReactionDraft {
            body: "nice".to_owned(),
            author_handle: "bob".to_owned(),
        })
        .expect("valid reaction");
        let id = reaction.id;
        let post = Post {
            id: EntityId::generate(),
            body: "hello".to_owned(),
            author_handle: "ada".to_owned(),
            created_at: Utc::now(),
            reactions: vec![reaction],
        };
        assert_eq!(post.reaction_count(), 1);
        assert!(post.reaction(&id).is_some());
        assert!(post.reaction(&EntityId::generate()).is_none());
    }
}
