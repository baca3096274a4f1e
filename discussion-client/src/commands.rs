//! Command parsing and execution.
//!
//! Every command produces a JSON value that `main` prints to stdout.
use discussion_core::{assemble, NodeId};
use discussion_repository::DiscussionRepository;
use discussion_shared::{SearchQuery, VotableId, VotableKind, VoteDirection};
use serde_json::{json, Value};
use tracing::info;

use crate::config::Dependencies;
use crate::errors::ClientError;

const USAGE: &str = "usage: discussion-client <search TEXT | suggest TEXT | thread ID | vote KIND ID up|down>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Suggest(String),
    Thread(u64),
    Vote {
        target: VotableId,
        direction: VoteDirection,
    },
}

fn parse_id(raw: &str) -> Result<u64, ClientError> {
    raw.parse()
        .map_err(|_| ClientError::usage(format!("invalid id: {}", raw)))
}

fn parse_direction(raw: &str) -> Result<VoteDirection, ClientError> {
    match raw.to_ascii_lowercase().as_str() {
        "up" | "upvote" => Ok(VoteDirection::Upvote),
        "down" | "downvote" => Ok(VoteDirection::Downvote),
        other => Err(ClientError::usage(format!("invalid direction: {}", other))),
    }
}

impl Command {
    /// Parse a command from the arguments following the program name.
    pub fn parse(args: &[String]) -> Result<Self, ClientError> {
        let Some((name, rest)) = args.split_first() else {
            return Err(ClientError::usage(USAGE));
        };

        match (name.as_str(), rest) {
            ("search", words) if !words.is_empty() => Ok(Command::Search(words.join(" "))),
            ("suggest", words) if !words.is_empty() => Ok(Command::Suggest(words.join(" "))),
            ("thread", [id]) => Ok(Command::Thread(parse_id(id)?)),
            ("vote", [kind, id, direction]) => {
                let kind: VotableKind = kind.parse().map_err(ClientError::usage)?;
                Ok(Command::Vote {
                    target: VotableId::new(kind, parse_id(id)?),
                    direction: parse_direction(direction)?,
                })
            }
            _ => Err(ClientError::usage(USAGE)),
        }
    }
}

/// Run `command` against the wired dependencies.
///
/// # Returns
///
/// The JSON document to print, or the first error encountered.
pub async fn run(command: Command, deps: &Dependencies) -> Result<Value, ClientError> {
    match command {
        Command::Search(text) => {
            let query = SearchQuery::new(text).with_per_page(deps.config.search_per_page);
            let result = deps.search.search(&query).await?;
            info!(query = %result.query, grand_total = result.grand_total, "Search completed");
            Ok(serde_json::to_value(result)?)
        }
        Command::Suggest(text) => {
            let suggestions = deps.search.suggest(&text).await?;
            Ok(serde_json::to_value(suggestions)?)
        }
        Command::Thread(thread_id) => {
            let page = deps
                .repository
                .list_comments(thread_id, 1, deps.config.comments_per_page)
                .await?;
            let total = page.total;
            let has_more_comments = page.has_next();
            let tree = assemble(page.items, deps.config.reply_loading)?;
            deps.votes.observe_tree(&tree).await?;

            let more_replies: Vec<NodeId> = tree
                .nodes()
                .iter()
                .flat_map(|node| {
                    std::iter::once(NodeId::Comment(node.comment.id)).chain(
                        node.comment
                            .replies
                            .iter()
                            .map(|reply| NodeId::Reply(reply.id)),
                    )
                })
                .filter(|node| tree.has_more_replies(*node))
                .collect();

            Ok(json!({
                "thread_id": thread_id,
                "total_comments": total,
                "has_more_comments": has_more_comments,
                "discussion": tree,
                "more_replies": more_replies,
            }))
        }
        Command::Vote { target, direction } => {
            let (counters, viewer_vote) = deps
                .repository
                .viewer_state(target)
                .await
                .ok_or_else(|| ClientError::usage(format!("{} does not exist", target)))?;
            let before = deps.votes.reconcile(target, viewer_vote, counters).await?;
            let after = deps.votes.cast(target, direction).await?;

            Ok(json!({
                "target": target,
                "before": before,
                "after": after,
                "score": after.counters.score(),
            }))
        }
    }
}
