use clap::Subcommand;
use purepath_core::coach::load_article;
use purepath_core::content::library::{find_topic, LIBRARY_TOPICS};
use purepath_core::{Config, Database, GeminiClient, StatsStore};
use serde::Serialize;
use tracing::info;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum LibraryAction {
    /// List library topics and whether each article is cached
    List,
    /// Print a topic's article, generating it on first read
    Read {
        /// Topic id (dopamine, flatline, triggers, benefits, chaser, stoicism)
        id: String,
    },
    /// Forget cached articles so they are generated again
    Clear,
}

#[derive(Serialize)]
struct TopicEntry {
    id: &'static str,
    title: &'static str,
    cached: bool,
}

pub fn run(action: LibraryAction) -> CmdResult {
    let db = Database::open()?;
    let store = StatsStore::new(&db);

    match action {
        LibraryAction::List => {
            let cached = store.cached_article_ids()?;
            let entries: Vec<_> = LIBRARY_TOPICS
                .iter()
                .map(|t| TopicEntry {
                    id: t.id,
                    title: t.title,
                    cached: cached.contains(t.id),
                })
                .collect();
            print_json(&entries)?;
        }
        LibraryAction::Read { id } => {
            let topic = find_topic(&id).ok_or_else(|| format!("no library topic named '{id}'"))?;
            let text = match store.cached_article(topic.id)? {
                Some(text) => text,
                None => {
                    info!(topic = topic.id, "article not cached, asking the coach");
                    let client = GeminiClient::from_config(&Config::load_or_default().coach)?;
                    let rt = tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()?;
                    rt.block_on(load_article(&store, &client, topic))?
                }
            };
            println!("{text}");
        }
        LibraryAction::Clear => {
            let removed = store.clear_article_cache()?;
            eprintln!("removed {removed} cached article(s)");
        }
    }
    Ok(())
}
