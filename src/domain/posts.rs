//! Post identity and the field set stored per row.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use foglio_api_types::{Post, PostListItem};

/// The public identifier of a post.
///
/// Generated once at creation and stored inside the row's fields; it is a
/// separate value from the gateway's own record key and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Mint a fresh identifier. Uniqueness is delegated to the generator.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The field bag of one row in the remote table.
///
/// All members are optional: the listing projection drops `content`, and
/// rows created with missing fields simply keep them absent. Serialization
/// skips absent members so partial updates only carry what they overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Date>,
}

impl PostFields {
    /// Shallow merge: members present in `patch` overwrite, absent members
    /// keep their current value. The identifier is immutable and ignored.
    pub fn merge(&mut self, patch: PostFields) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
        if let Some(published_at) = patch.published_at {
            self.published_at = Some(published_at);
        }
    }

    /// Convert into the item representation. Rows without an identifier are
    /// unaddressable and yield `None`.
    pub fn into_post(self) -> Option<Post> {
        Some(Post {
            id: self.id?,
            title: self.title,
            content: self.content,
            published_at: self.published_at,
        })
    }

    /// Convert into the listing projection, dropping `content`.
    pub fn into_list_item(self) -> Option<PostListItem> {
        Some(PostListItem {
            id: self.id?,
            title: self.title,
            published_at: self.published_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn fields(title: &str, content: &str) -> PostFields {
        PostFields {
            id: Some("p1".to_string()),
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            published_at: Some(date!(2023 - 01 - 01)),
        }
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = PostId::generate();
        let b = PostId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn merge_is_shallow() {
        let mut current = fields("A", "B");
        current.merge(PostFields {
            title: Some("C".to_string()),
            ..PostFields::default()
        });

        assert_eq!(current.title.as_deref(), Some("C"));
        assert_eq!(current.content.as_deref(), Some("B"));
        assert_eq!(current.published_at, Some(date!(2023 - 01 - 01)));
    }

    #[test]
    fn merge_never_touches_the_identifier() {
        let mut current = fields("A", "B");
        current.merge(PostFields {
            id: Some("other".to_string()),
            ..PostFields::default()
        });

        assert_eq!(current.id.as_deref(), Some("p1"));
    }

    #[test]
    fn rows_without_an_id_are_unaddressable() {
        let row = PostFields {
            title: Some("orphan".to_string()),
            ..PostFields::default()
        };

        assert!(row.clone().into_post().is_none());
        assert!(row.into_list_item().is_none());
    }
}
