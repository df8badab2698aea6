//! Keyed query cache.
//!
//! One cache instance is created per invocation and passed by reference to
//! whatever needs it; there is no process-wide singleton. Two kinds of
//! entries exist: the listing under [`QueryKey::Posts`] and single posts
//! under [`QueryKey::Post`]. Entries hold the last-known server
//! representation or an optimistic placeholder awaiting reconciliation.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use foglio_api_types::{Post, PostListItem};

/// Identifies one cached query result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Posts,
    Post(String),
}

/// Captured pre-mutation state of one key, used to roll an optimistic write
/// back when the mutation fails.
#[derive(Debug, Clone)]
pub enum Snapshot {
    Posts(Option<Vec<PostListItem>>),
    Post(String, Option<Post>),
}

#[derive(Default)]
pub struct QueryCache {
    posts: RwLock<Option<Vec<PostListItem>>>,
    posts_by_id: RwLock<HashMap<String, Post>>,
}

// A poisoned lock only means a writer panicked mid-update; the data is
// plain-old values, so recover the guard instead of propagating the panic.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|err| err.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|err| err.into_inner())
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_posts(&self) -> Option<Vec<PostListItem>> {
        read(&self.posts).clone()
    }

    pub fn set_posts(&self, value: Vec<PostListItem>) {
        *write(&self.posts) = Some(value);
    }

    pub fn invalidate_posts(&self) {
        *write(&self.posts) = None;
    }

    /// Append one item to the cached listing, creating the list when the
    /// key was empty. This is the optimistic write for a create.
    pub fn append_post(&self, item: PostListItem) {
        let mut posts = write(&self.posts);
        posts.get_or_insert_with(Vec::new).push(item);
    }

    pub fn get_post(&self, id: &str) -> Option<Post> {
        read(&self.posts_by_id).get(id).cloned()
    }

    pub fn set_post(&self, post: Post) {
        write(&self.posts_by_id).insert(post.id.clone(), post);
    }

    pub fn invalidate_post(&self, id: &str) {
        write(&self.posts_by_id).remove(id);
    }

    /// Capture the current value of a key.
    pub fn snapshot(&self, key: &QueryKey) -> Snapshot {
        match key {
            QueryKey::Posts => Snapshot::Posts(self.get_posts()),
            QueryKey::Post(id) => Snapshot::Post(id.clone(), self.get_post(id)),
        }
    }

    /// Put a key back to a previously captured value.
    pub fn restore(&self, snapshot: Snapshot) {
        match snapshot {
            Snapshot::Posts(Some(value)) => self.set_posts(value),
            Snapshot::Posts(None) => self.invalidate_posts(),
            Snapshot::Post(_, Some(post)) => self.set_post(post),
            Snapshot::Post(id, None) => self.invalidate_post(&id),
        }
    }
}
