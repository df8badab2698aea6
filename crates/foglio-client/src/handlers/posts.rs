use serde_json::json;
use time::Date;

use foglio_api_types::{Post, PostListItem, PostListResponse};
use foglio_client::api::{Api, ClientError};
use foglio_client::cache::{QueryCache, QueryKey};
use foglio_client::form::{DATE_FORMAT, PostForm};
use foglio_client::mutation::{self, OptimisticWrite};

use crate::args::PostsCmd;
use crate::print::print_json;

pub async fn handle(api: &Api, cmd: PostsCmd) -> Result<(), ClientError> {
    let cache = QueryCache::new();

    match cmd {
        PostsCmd::List {
            page_offset,
            page_size,
        } => list(api, &cache, page_offset, page_size).await,
        PostsCmd::Show { id } => show(api, &cache, id).await,
        PostsCmd::Create {
            title,
            content,
            published_at,
        } => create(api, &cache, title, content, published_at).await,
        PostsCmd::Edit {
            id,
            title,
            content,
            published_at,
        } => edit(api, &cache, id, title, content, published_at).await,
        PostsCmd::Delete { id } => delete(api, &cache, id).await,
    }
}

/// Repopulate one cache key from the server. Reconciliation is best effort:
/// a failed refetch leaves the key invalidated rather than stale.
async fn reconcile(api: &Api, cache: &QueryCache, key: QueryKey) {
    match key {
        QueryKey::Posts => match api.list_posts(None).await {
            Ok(listing) => cache.set_posts(listing.into_items()),
            Err(_) => cache.invalidate_posts(),
        },
        QueryKey::Post(id) => match api.get_post(&id).await {
            Ok(post) => cache.set_post(post),
            Err(_) => cache.invalidate_post(&id),
        },
    }
}

/// Lexicographic title sort, ascending. Plain string comparison; absent
/// titles sort first.
fn sort_by_title(items: &mut [PostListItem]) {
    items.sort_by(|a, b| a.title.cmp(&b.title));
}

async fn list(
    api: &Api,
    cache: &QueryCache,
    page_offset: Option<u32>,
    page_size: Option<u32>,
) -> Result<(), ClientError> {
    let page = page_size.map(|size| (page_offset.unwrap_or(0), size));

    match api.list_posts(page).await? {
        PostListResponse::Full(mut items) => {
            cache.set_posts(items.clone());
            sort_by_title(&mut items);
            print_json(&items)
        }
        PostListResponse::Page(mut page) => {
            sort_by_title(&mut page.items);
            print_json(&page)
        }
    }
}

async fn show(api: &Api, cache: &QueryCache, id: String) -> Result<(), ClientError> {
    let post = api.get_post(&id).await?;
    cache.set_post(post.clone());
    print_json(&post)
}

async fn create(
    api: &Api,
    cache: &QueryCache,
    title: String,
    content: String,
    published_at: Option<String>,
) -> Result<(), ClientError> {
    let mut form = PostForm::create();
    form.set_title(title);
    form.set_content(content);
    if let Some(date) = published_at {
        form.set_published_at(parse_date(&date)?);
    }

    let values = form.submit();
    // The listing is optimistically appended before the server assigns an
    // id; the placeholder is reconciled away by the settle refetch.
    let optimistic = PostListItem {
        id: String::new(),
        title: Some(values.title.clone()),
        published_at: Some(values.published_at),
    };
    let request = values.into_create_request();

    let created = mutation::run(
        cache,
        OptimisticWrite::AppendToListing(optimistic),
        api.create_post(&request),
        |key| reconcile(api, cache, key),
    )
    .await?;

    print_json(&created)
}

async fn edit(
    api: &Api,
    cache: &QueryCache,
    id: String,
    title: Option<String>,
    content: Option<String>,
    published_at: Option<String>,
) -> Result<(), ClientError> {
    let current = api.get_post(&id).await?;
    cache.set_post(current.clone());

    let mut form = PostForm::edit(&current);
    if let Some(title) = title {
        form.set_title(title);
    }
    if let Some(content) = content {
        form.set_content(content);
    }
    if let Some(date) = published_at {
        form.set_published_at(parse_date(&date)?);
    }

    let values = form.submit();
    let optimistic = Post {
        id: id.clone(),
        title: Some(values.title.clone()),
        content: Some(values.content.clone()),
        published_at: Some(values.published_at),
    };
    let request = values.into_update_request();

    let updated = mutation::run(
        cache,
        OptimisticWrite::OverwritePost(optimistic),
        api.update_post(&id, &request),
        |key| reconcile(api, cache, key),
    )
    .await?;

    print_json(&updated)
}

async fn delete(api: &Api, cache: &QueryCache, id: String) -> Result<(), ClientError> {
    api.delete_post(&id).await?;
    cache.invalidate_post(&id);
    cache.invalidate_posts();
    print_json(&json!({ "deleted": id }))
}

fn parse_date(value: &str) -> Result<Date, ClientError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|err| ClientError::InvalidInput(format!("invalid date `{value}`: {err}")))
}
