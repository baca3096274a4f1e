//! Builds the comment → reply → nested reply tree rendered under a thread.
//!
//! The server already nests replies inside comments and nested replies inside
//! replies, so assembly is about validating counts, placing comments that
//! name a parent, and answering "are there more replies to load".
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use discussion_shared::{Comment, Reply};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::TreeError;

/// How replies were delivered with the comment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyLoading {
    /// Every reply is embedded; counts must match lengths exactly.
    Embedded,
    /// Replies are paginated separately; counts are authoritative totals.
    #[default]
    Paginated,
}

impl FromStr for ReplyLoading {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embedded" => Ok(ReplyLoading::Embedded),
            "paginated" => Ok(ReplyLoading::Paginated),
            other => Err(format!("unknown reply loading mode: {}", other)),
        }
    }
}

/// A node that can own replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NodeId {
    Comment(u64),
    Reply(u64),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Comment(id) => write!(f, "comment {}", id),
            NodeId::Reply(id) => write!(f, "reply {}", id),
        }
    }
}

/// Where a comment sits relative to the rest of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "placement", content = "parent_id", rename_all = "snake_case")]
pub enum Placement {
    TopLevel,
    /// The parent is part of the discussion. The comment keeps its position.
    InReplyTo(u64),
    /// The parent is not part of the discussion; rendered as top level with
    /// a provenance note.
    Dangling(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    pub comment: Comment,
    pub placement: Placement,
}

/// The assembled discussion under one thread, in server order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscussionTree {
    loading: ReplyLoading,
    nodes: Vec<CommentNode>,
}

/// Assembles a page of comments into a `DiscussionTree`.
///
/// Ordering is exactly the input order; nothing is re-sorted, re-parented or
/// dropped.
///
/// # Arguments
///
/// * `comments` - The comments of one page, each with its embedded replies
/// * `loading` - Whether replies are fully embedded or paginated separately
///
/// # Returns
///
/// The tree, or a `TreeError` when reply counts contradict the embedded
/// replies or an id repeats.
pub fn assemble(comments: Vec<Comment>, loading: ReplyLoading) -> Result<DiscussionTree, TreeError> {
    let mut tree = DiscussionTree {
        loading,
        nodes: Vec::with_capacity(comments.len()),
    };

    let mut seen = HashSet::with_capacity(comments.len());
    let mut reply_ids = HashSet::new();
    for comment in &comments {
        if !seen.insert(comment.id) {
            return Err(TreeError::DuplicateNode(NodeId::Comment(comment.id)));
        }
        validate_comment(comment, loading, &mut reply_ids)?;
    }

    for comment in comments {
        let placement = place(&comment, &seen);
        tree.nodes.push(CommentNode { comment, placement });
    }

    debug!(
        comments = tree.nodes.len(),
        replies = reply_ids.len(),
        dangling = tree.dangling().count(),
        "Assembled discussion tree"
    );
    Ok(tree)
}

fn place(comment: &Comment, known: &HashSet<u64>) -> Placement {
    match comment.parent_id {
        None => Placement::TopLevel,
        Some(parent) if known.contains(&parent) => Placement::InReplyTo(parent),
        Some(parent) => {
            warn!(
                comment_id = comment.id,
                parent_id = parent,
                thread_id = comment.thread_id,
                "Comment references a parent outside the page, rendering at top level"
            );
            Placement::Dangling(parent)
        }
    }
}

fn check_count(node: NodeId, count: u32, len: usize, loading: ReplyLoading) -> Result<(), TreeError> {
    let fits = match loading {
        ReplyLoading::Embedded => len == count as usize,
        ReplyLoading::Paginated => len <= count as usize,
    };
    if fits {
        return Ok(());
    }
    Err(match loading {
        ReplyLoading::Embedded => TreeError::CountMismatch {
            node,
            expected: count,
            actual: len,
        },
        ReplyLoading::Paginated => TreeError::CountExceeded {
            node,
            expected: count,
            actual: len,
        },
    })
}

fn claim_reply_id(reply_ids: &mut HashSet<u64>, reply: &Reply) -> Result<(), TreeError> {
    if reply_ids.insert(reply.id) {
        Ok(())
    } else {
        Err(TreeError::DuplicateNode(NodeId::Reply(reply.id)))
    }
}

/// Nested replies are the last tier: their own reply lists are never read.
fn validate_reply(
    reply: &Reply,
    loading: ReplyLoading,
    reply_ids: &mut HashSet<u64>,
) -> Result<(), TreeError> {
    let node = NodeId::Reply(reply.id);
    check_count(node, reply.nested_replies_count, reply.nested_replies.len(), loading)?;
    for nested in &reply.nested_replies {
        claim_reply_id(reply_ids, nested)?;
    }
    Ok(())
}

fn validate_comment(
    comment: &Comment,
    loading: ReplyLoading,
    reply_ids: &mut HashSet<u64>,
) -> Result<(), TreeError> {
    let node = NodeId::Comment(comment.id);
    check_count(node, comment.replies_count, comment.replies.len(), loading)?;
    for reply in &comment.replies {
        claim_reply_id(reply_ids, reply)?;
        validate_reply(reply, loading, reply_ids)?;
    }
    Ok(())
}

/// Append the replies whose ids are not already held, in arrival order.
///
/// A reply held by another node of the tree is a `TreeError::DuplicateNode`.
fn merge_page(
    node: NodeId,
    held: &mut Vec<Reply>,
    total: u32,
    page: Vec<Reply>,
    reply_ids: &mut HashSet<u64>,
    validate_each: bool,
) -> Result<usize, TreeError> {
    let known: HashSet<u64> = held.iter().map(|reply| reply.id).collect();
    let mut fresh = Vec::with_capacity(page.len());
    let mut fresh_ids = HashSet::with_capacity(page.len());
    for reply in page {
        if known.contains(&reply.id) || fresh_ids.contains(&reply.id) {
            continue;
        }
        claim_reply_id(reply_ids, &reply)?;
        fresh_ids.insert(reply.id);
        if validate_each {
            validate_reply(&reply, ReplyLoading::Paginated, reply_ids)?;
        }
        fresh.push(reply);
    }

    check_count(node, total, held.len() + fresh.len(), ReplyLoading::Paginated)?;

    let appended = fresh.len();
    held.extend(fresh);
    Ok(appended)
}

impl DiscussionTree {
    pub fn loading(&self) -> ReplyLoading {
        self.loading
    }

    pub fn nodes(&self) -> &[CommentNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Comments whose parent is not part of the discussion.
    pub fn dangling(&self) -> impl Iterator<Item = &CommentNode> {
        self.nodes
            .iter()
            .filter(|node| matches!(node.placement, Placement::Dangling(_)))
    }

    pub fn get_comment(&self, comment_id: u64) -> Option<&CommentNode> {
        self.nodes.iter().find(|node| node.comment.id == comment_id)
    }

    /// Find a reply or nested reply by id. Reply ids are unique across the
    /// whole tree.
    pub fn get_reply(&self, reply_id: u64) -> Option<&Reply> {
        self.nodes
            .iter()
            .flat_map(|node| node.comment.replies.iter())
            .find_map(|reply| {
                if reply.id == reply_id {
                    Some(reply)
                } else {
                    reply.nested_replies.iter().find(|nested| nested.id == reply_id)
                }
            })
    }

    /// Replies directly under a comment, the only replies that own nested
    /// replies.
    fn get_parent_reply(&self, reply_id: u64) -> Option<&Reply> {
        self.nodes
            .iter()
            .flat_map(|node| node.comment.replies.iter())
            .find(|reply| reply.id == reply_id)
    }

    fn get_parent_reply_mut(&mut self, reply_id: u64) -> Option<&mut Reply> {
        self.nodes
            .iter_mut()
            .flat_map(|node| node.comment.replies.iter_mut())
            .find(|reply| reply.id == reply_id)
    }

    fn reply_ids(&self) -> HashSet<u64> {
        self.nodes
            .iter()
            .flat_map(|node| node.comment.replies.iter())
            .flat_map(|reply| {
                std::iter::once(reply.id).chain(reply.nested_replies.iter().map(|nested| nested.id))
            })
            .collect()
    }

    /// True when the server holds more replies under `node` than the tree
    /// currently carries. Unknown nodes and nested replies have nothing to
    /// load.
    pub fn has_more_replies(&self, node: NodeId) -> bool {
        match node {
            NodeId::Comment(id) => self
                .get_comment(id)
                .map(|node| node.comment.replies.len() < node.comment.replies_count as usize)
                .unwrap_or(false),
            NodeId::Reply(id) => self
                .get_parent_reply(id)
                .map(|reply| reply.nested_replies.len() < reply.nested_replies_count as usize)
                .unwrap_or(false),
        }
    }

    /// Append a further page of replies under a comment.
    ///
    /// Replies already held are skipped, so overlapping pages are harmless.
    ///
    /// # Returns
    ///
    /// The number of replies appended, `TreeError::UnknownNode` when the
    /// comment is not in the tree, or `TreeError::CountExceeded` when the page
    /// would take the comment past its reply count.
    pub fn extend_replies(&mut self, comment_id: u64, replies: Vec<Reply>) -> Result<usize, TreeError> {
        let node = NodeId::Comment(comment_id);
        let mut reply_ids = self.reply_ids();
        let target = self
            .nodes
            .iter_mut()
            .find(|node| node.comment.id == comment_id)
            .ok_or(TreeError::UnknownNode(node))?;

        let total = target.comment.replies_count;
        merge_page(node, &mut target.comment.replies, total, replies, &mut reply_ids, true)
    }

    /// Append a further page of nested replies under a reply.
    pub fn extend_nested_replies(&mut self, reply_id: u64, replies: Vec<Reply>) -> Result<usize, TreeError> {
        let node = NodeId::Reply(reply_id);
        let mut reply_ids = self.reply_ids();
        let target = self
            .get_parent_reply_mut(reply_id)
            .ok_or(TreeError::UnknownNode(node))?;

        let total = target.nested_replies_count;
        merge_page(node, &mut target.nested_replies, total, replies, &mut reply_ids, false)
    }

    /// Append a further page of comments.
    ///
    /// Comments already held are skipped. Dangling comments whose parent
    /// arrives with this page become `InReplyTo` without moving.
    ///
    /// # Returns
    ///
    /// The number of comments appended.
    pub fn extend_comments(&mut self, comments: Vec<Comment>) -> Result<usize, TreeError> {
        let mut known: HashSet<u64> = self.nodes.iter().map(|node| node.comment.id).collect();
        let mut reply_ids = self.reply_ids();
        let mut fresh = Vec::with_capacity(comments.len());
        for comment in comments {
            if !known.insert(comment.id) {
                continue;
            }
            validate_comment(&comment, self.loading, &mut reply_ids)?;
            fresh.push(comment);
        }

        for node in &mut self.nodes {
            if let Placement::Dangling(parent) = node.placement {
                if known.contains(&parent) {
                    debug!(comment_id = node.comment.id, parent_id = parent, "Dangling parent arrived");
                    node.placement = Placement::InReplyTo(parent);
                }
            }
        }

        let appended = fresh.len();
        for comment in fresh {
            let placement = place(&comment, &known);
            self.nodes.push(CommentNode { comment, placement });
        }
        Ok(appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(id: u64, nested: Vec<Reply>, nested_count: u32) -> Reply {
        serde_json::from_value(json!({
            "id": id,
            "body": format!("reply {}", id),
            "author": { "id": 2, "username": "ben" },
            "upvotes": 0,
            "downvotes": 0,
            "nested_replies_count": nested_count,
            "nested_replies": nested,
            "created_at": "2024-04-23T09:00:00Z",
            "updated_at": "2024-04-23T09:00:00Z"
        }))
        .unwrap()
    }

    fn comment(id: u64, parent_id: Option<u64>, replies: Vec<Reply>, replies_count: u32) -> Comment {
        serde_json::from_value(json!({
            "id": id,
            "thread_id": 1,
            "parent_id": parent_id,
            "body": format!("comment {}", id),
            "author": { "id": 1, "username": "ana" },
            "upvotes": 1,
            "downvotes": 0,
            "replies_count": replies_count,
            "replies": replies,
            "created_at": "2024-04-23T08:00:00Z",
            "updated_at": "2024-04-23T08:00:00Z"
        }))
        .unwrap()
    }

    fn ids(tree: &DiscussionTree) -> Vec<u64> {
        tree.nodes().iter().map(|node| node.comment.id).collect()
    }

    #[test]
    fn test_empty_input_gives_empty_tree() {
        let tree = assemble(Vec::new(), ReplyLoading::Embedded).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.dangling().count(), 0);
    }

    #[test]
    fn test_input_order_is_preserved() {
        let comments = vec![
            comment(30, None, vec![], 0),
            comment(10, None, vec![], 0),
            comment(20, None, vec![], 0),
        ];
        let tree = assemble(comments, ReplyLoading::Embedded).unwrap();
        assert_eq!(ids(&tree), vec![30, 10, 20]);
    }

    #[test]
    fn test_has_more_replies_when_paginated() {
        let comments = vec![comment(1, None, vec![reply(11, vec![], 0)], 3)];
        let tree = assemble(comments, ReplyLoading::Paginated).unwrap();

        assert!(tree.has_more_replies(NodeId::Comment(1)));
        assert!(!tree.has_more_replies(NodeId::Reply(11)));
        assert!(!tree.has_more_replies(NodeId::Comment(99)));
    }

    #[test]
    fn test_embedded_count_mismatch() {
        let comments = vec![comment(1, None, vec![reply(11, vec![], 0)], 3)];
        let err = assemble(comments, ReplyLoading::Embedded).unwrap_err();
        assert_eq!(
            err,
            TreeError::CountMismatch {
                node: NodeId::Comment(1),
                expected: 3,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_nested_counts_are_checked_one_level_down() {
        let nested = vec![reply(111, vec![], 0), reply(112, vec![], 0)];
        let comments = vec![comment(1, None, vec![reply(11, nested, 1)], 1)];
        let err = assemble(comments, ReplyLoading::Paginated).unwrap_err();
        assert!(matches!(
            err,
            TreeError::CountExceeded {
                node: NodeId::Reply(11),
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_comment_is_rejected() {
        let comments = vec![comment(1, None, vec![], 0), comment(1, None, vec![], 0)];
        let err = assemble(comments, ReplyLoading::Embedded).unwrap_err();
        assert_eq!(err, TreeError::DuplicateNode(NodeId::Comment(1)));
    }

    #[test]
    fn test_dangling_parent_stays_in_place() {
        let comments = vec![
            comment(1, None, vec![], 0),
            comment(2, Some(77), vec![], 0),
            comment(3, Some(1), vec![], 0),
        ];
        let tree = assemble(comments, ReplyLoading::Embedded).unwrap();

        assert_eq!(ids(&tree), vec![1, 2, 3]);
        assert_eq!(tree.nodes()[1].placement, Placement::Dangling(77));
        assert_eq!(tree.nodes()[2].placement, Placement::InReplyTo(1));
        assert_eq!(tree.dangling().count(), 1);
    }

    #[test]
    fn test_highlight_is_carried_through() {
        let mut highlighted = comment(5, None, vec![], 0);
        highlighted.is_highlighted = true;
        let tree = assemble(vec![highlighted], ReplyLoading::Embedded).unwrap();
        assert!(tree.get_comment(5).unwrap().comment.is_highlighted);
    }

    #[test]
    fn test_get_reply_finds_nested() {
        let comments = vec![comment(1, None, vec![reply(11, vec![reply(111, vec![], 0)], 1)], 1)];
        let tree = assemble(comments, ReplyLoading::Embedded).unwrap();
        assert_eq!(tree.get_reply(111).map(|r| r.id), Some(111));
        assert_eq!(tree.get_reply(11).map(|r| r.id), Some(11));
        assert!(tree.get_reply(5).is_none());
    }

    #[test]
    fn test_nested_reply_has_nothing_to_load() {
        // The nested tier cannot own replies, whatever its count says.
        let nested = vec![reply(111, vec![], 4)];
        let comments = vec![comment(1, None, vec![reply(11, nested, 1)], 1)];
        let mut tree = assemble(comments, ReplyLoading::Embedded).unwrap();

        assert!(!tree.has_more_replies(NodeId::Reply(111)));
        assert!(!tree.has_more_replies(NodeId::Reply(11)));
        assert_eq!(
            tree.extend_nested_replies(111, vec![]),
            Err(TreeError::UnknownNode(NodeId::Reply(111)))
        );
    }

    #[test]
    fn test_reply_ids_are_unique_across_tree() {
        let comments = vec![
            comment(1, None, vec![reply(11, vec![], 0)], 1),
            comment(2, None, vec![reply(11, vec![], 0)], 1),
        ];
        assert_eq!(
            assemble(comments, ReplyLoading::Embedded).unwrap_err(),
            TreeError::DuplicateNode(NodeId::Reply(11))
        );

        let comments = vec![comment(1, None, vec![reply(11, vec![reply(11, vec![], 0)], 1)], 1)];
        assert_eq!(
            assemble(comments, ReplyLoading::Embedded).unwrap_err(),
            TreeError::DuplicateNode(NodeId::Reply(11))
        );
    }

    #[test]
    fn test_extend_replies_rejects_reply_held_elsewhere() {
        let comments = vec![
            comment(1, None, vec![reply(11, vec![reply(111, vec![], 0)], 1)], 1),
            comment(2, None, vec![], 2),
        ];
        let mut tree = assemble(comments, ReplyLoading::Paginated).unwrap();

        let err = tree
            .extend_replies(2, vec![reply(21, vec![], 0), reply(111, vec![], 0)])
            .unwrap_err();
        assert_eq!(err, TreeError::DuplicateNode(NodeId::Reply(111)));
        assert!(tree.get_comment(2).unwrap().comment.replies.is_empty());
        assert_eq!(tree.get_reply(111).map(|r| r.id), Some(111));
    }

    #[test]
    fn test_extend_replies_skips_overlap() {
        let comments = vec![comment(1, None, vec![reply(11, vec![], 0)], 3)];
        let mut tree = assemble(comments, ReplyLoading::Paginated).unwrap();

        let appended = tree
            .extend_replies(1, vec![reply(11, vec![], 0), reply(12, vec![], 0)])
            .unwrap();
        assert_eq!(appended, 1);
        assert!(tree.has_more_replies(NodeId::Comment(1)));

        tree.extend_replies(1, vec![reply(13, vec![], 0)]).unwrap();
        assert!(!tree.has_more_replies(NodeId::Comment(1)));
        let order: Vec<u64> = tree.get_comment(1).unwrap().comment.replies.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![11, 12, 13]);
    }

    #[test]
    fn test_extend_replies_past_count_fails() {
        let comments = vec![comment(1, None, vec![reply(11, vec![], 0)], 1)];
        let mut tree = assemble(comments, ReplyLoading::Paginated).unwrap();
        let err = tree.extend_replies(1, vec![reply(12, vec![], 0)]).unwrap_err();
        assert!(matches!(err, TreeError::CountExceeded { .. }));
        assert_eq!(tree.get_comment(1).unwrap().comment.replies.len(), 1);
    }

    #[test]
    fn test_extend_unknown_node() {
        let mut tree = assemble(Vec::new(), ReplyLoading::Paginated).unwrap();
        assert_eq!(
            tree.extend_replies(4, vec![]),
            Err(TreeError::UnknownNode(NodeId::Comment(4)))
        );
        assert_eq!(
            tree.extend_nested_replies(4, vec![]),
            Err(TreeError::UnknownNode(NodeId::Reply(4)))
        );
    }

    #[test]
    fn test_extend_nested_replies() {
        let comments = vec![comment(1, None, vec![reply(11, vec![], 2)], 1)];
        let mut tree = assemble(comments, ReplyLoading::Paginated).unwrap();
        assert!(tree.has_more_replies(NodeId::Reply(11)));

        let appended = tree
            .extend_nested_replies(11, vec![reply(111, vec![], 0), reply(112, vec![], 0)])
            .unwrap();
        assert_eq!(appended, 2);
        assert!(!tree.has_more_replies(NodeId::Reply(11)));
    }

    #[test]
    fn test_extend_comments_resolves_dangling() {
        let mut tree = assemble(vec![comment(2, Some(1), vec![], 0)], ReplyLoading::Paginated).unwrap();
        assert_eq!(tree.dangling().count(), 1);

        let appended = tree
            .extend_comments(vec![comment(2, Some(1), vec![], 0), comment(1, None, vec![], 0)])
            .unwrap();

        assert_eq!(appended, 1);
        assert_eq!(ids(&tree), vec![2, 1]);
        assert_eq!(tree.nodes()[0].placement, Placement::InReplyTo(1));
        assert_eq!(tree.dangling().count(), 0);
    }

    #[test]
    fn test_reply_loading_from_str() {
        assert_eq!("Embedded".parse::<ReplyLoading>(), Ok(ReplyLoading::Embedded));
        assert_eq!(" paginated ".parse::<ReplyLoading>(), Ok(ReplyLoading::Paginated));
        assert!("lazy".parse::<ReplyLoading>().is_err());
    }
}
