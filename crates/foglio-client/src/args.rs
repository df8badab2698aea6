//! Command-line surface for `foglio-cli`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "foglio-cli", version, about = "Foglio blog API CLI", long_about = None)]
pub struct Cli {
    /// API base URL, e.g. <http://localhost:3000>
    #[arg(long, env = "FOGLIO_API_URL")]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post management (list/read/create/edit/delete)
    Posts(PostsArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts, sorted by title
    List {
        #[arg(long)]
        page_offset: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show one post by id
    Show { id: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Publish date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        published_at: Option<String>,
    },
    /// Edit a post; omitted flags keep the current values
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Publish date (YYYY-MM-DD)
        #[arg(long)]
        published_at: Option<String>,
    },
    /// Delete a post by id
    Delete { id: String },
}
