//! Integration tests assembling the sample fixture's discussion.

use discussion_core::{assemble, NodeId, Placement, ReplyLoading, VoteLedger};
use discussion_repository::{DiscussionRepository, Fixture, MemoryRepository};
use discussion_shared::{VotableId, VoteDirection};

fn repository(embedded_replies: Option<usize>) -> MemoryRepository {
    let path = format!("{}/../fixtures/discussion.json", env!("CARGO_MANIFEST_DIR"));
    let repository = MemoryRepository::new(Fixture::load(path).unwrap(), 1);
    match embedded_replies {
        Some(limit) => repository.with_embedded_replies(limit),
        None => repository,
    }
}

#[tokio::test]
async fn test_fully_embedded_thread() {
    let repository = repository(None);
    let page = repository.list_comments(1, 1, 20).await.unwrap();
    let tree = assemble(page.items, ReplyLoading::Embedded).unwrap();

    let order: Vec<u64> = tree.nodes().iter().map(|node| node.comment.id).collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert_eq!(tree.nodes()[2].placement, Placement::Dangling(40));
    assert!(tree.get_comment(1).unwrap().comment.is_highlighted);
    assert!(!tree.has_more_replies(NodeId::Comment(1)));
    assert_eq!(
        tree.get_reply(3).and_then(|reply| reply.replying_to.as_ref()).map(|r| r.id),
        Some(1)
    );

    let mut ledger = VoteLedger::new();
    // 3 comments, 2 replies, 1 nested reply.
    assert_eq!(ledger.observe_tree(&tree).unwrap(), 6);
    assert_eq!(ledger.direction(VotableId::comment(1)), Some(VoteDirection::Upvote));
    assert_eq!(ledger.direction(VotableId::reply(2)), None);
}

#[tokio::test]
async fn test_paginated_replies_load_more() {
    let repository = repository(Some(1));
    let page = repository.list_comments(1, 1, 20).await.unwrap();
    let mut tree = assemble(page.items, ReplyLoading::Paginated).unwrap();

    assert!(tree.has_more_replies(NodeId::Comment(1)));
    assert!(!tree.has_more_replies(NodeId::Reply(1)));

    let more = repository.list_replies(1, 2, 1).await.unwrap();
    assert_eq!(tree.extend_replies(1, more.items).unwrap(), 1);
    assert!(!tree.has_more_replies(NodeId::Comment(1)));
}

#[tokio::test]
async fn test_truncated_replies_fail_embedded_assembly() {
    let repository = repository(Some(1));
    let page = repository.list_comments(1, 1, 20).await.unwrap();
    assert!(assemble(page.items, ReplyLoading::Embedded).is_err());
}
