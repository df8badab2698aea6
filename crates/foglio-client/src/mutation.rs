//! Optimistic mutation runner.
//!
//! Each mutation is an explicit three-phase transaction against the query
//! cache: snapshot the affected keys and apply the predicted value, run the
//! request, then roll back on failure. Whatever the outcome, settlement
//! forces a refetch of the listing (and the touched post, for updates) so
//! the cache always reconverges on server truth — at the cost of one extra
//! round trip after every mutation.

use std::future::Future;

use foglio_api_types::{Post, PostListItem};

use crate::cache::{QueryCache, QueryKey, Snapshot};

/// The predicted cache effect applied before the request settles.
#[derive(Debug, Clone)]
pub enum OptimisticWrite {
    /// Append a new post to the cached listing (create).
    AppendToListing(PostListItem),
    /// Overwrite one cached post (update).
    OverwritePost(Post),
}

impl OptimisticWrite {
    /// Keys snapshotted before the write and rolled back on failure.
    fn affected_keys(&self) -> Vec<QueryKey> {
        match self {
            Self::AppendToListing(_) => vec![QueryKey::Posts],
            Self::OverwritePost(post) => vec![QueryKey::Post(post.id.clone())],
        }
    }

    /// Keys refetched unconditionally once the mutation settles.
    fn settle_keys(&self) -> Vec<QueryKey> {
        match self {
            Self::AppendToListing(_) => vec![QueryKey::Posts],
            Self::OverwritePost(post) => {
                vec![QueryKey::Posts, QueryKey::Post(post.id.clone())]
            }
        }
    }

    fn apply(&self, cache: &QueryCache) {
        match self {
            Self::AppendToListing(item) => cache.append_post(item.clone()),
            Self::OverwritePost(post) => cache.set_post(post.clone()),
        }
    }
}

/// Run one mutation through the optimistic protocol.
///
/// `refetch` is invoked once per settle key after the request resolves,
/// success or failure alike; it is expected to repopulate the cache from
/// the server and to swallow its own errors (reconciliation is best
/// effort — a missed refetch leaves the key invalidated, not wrong).
pub async fn run<T, E, Fut, R, RFut>(
    cache: &QueryCache,
    write: OptimisticWrite,
    request: Fut,
    mut refetch: R,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    R: FnMut(QueryKey) -> RFut,
    RFut: Future<Output = ()>,
{
    let snapshots: Vec<Snapshot> = write
        .affected_keys()
        .iter()
        .map(|key| cache.snapshot(key))
        .collect();

    write.apply(cache);

    let result = request.await;

    if result.is_err() {
        for snapshot in snapshots {
            cache.restore(snapshot);
        }
    }

    for key in write.settle_keys() {
        refetch(key).await;
    }

    result
}
