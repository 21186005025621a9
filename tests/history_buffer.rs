//! Bounded per-channel history: cap, FIFO eviction, system turn first.

use outreach_bot::constants::{MAX_HISTORY, SYSTEM_PROMPT};
use outreach_bot::history::ChannelHistories;
use outreach_bot::llm::{ConversationTurn, Role};
use serenity::model::id::ChannelId;

fn channel(n: u64) -> ChannelId {
    ChannelId::new(n)
}

#[tokio::test]
async fn append_never_exceeds_cap_and_evicts_oldest_first() {
    let histories = ChannelHistories::new();
    let ch = channel(1);
    for i in 0..40 {
        histories
            .append(ch, ConversationTurn::user(format!("msg {i}")))
            .await;
    }
    assert_eq!(histories.len(ch).await, MAX_HISTORY);

    let turns = histories.completion_turns(ch).await;
    // System turn plus the stored buffer.
    assert_eq!(turns.len(), MAX_HISTORY + 1);
    // Oldest ten were evicted: the first stored turn is msg 10.
    assert_eq!(turns[1].content, "msg 10");
    assert_eq!(turns[turns.len() - 1].content, "msg 39");
}

#[tokio::test]
async fn completion_request_always_begins_with_system_turn() {
    let histories = ChannelHistories::new();
    let ch = channel(2);

    // Even an empty channel yields the system turn.
    let turns = histories.completion_turns(ch).await;
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, Role::System);
    assert_eq!(turns[0].content, SYSTEM_PROMPT);

    histories.append(ch, ConversationTurn::user("hello")).await;
    let turns = histories.completion_turns(ch).await;
    assert_eq!(turns[0].role, Role::System);
    assert_eq!(turns[1].content, "hello");
}

#[tokio::test]
async fn seed_applies_only_to_an_empty_channel() {
    let histories = ChannelHistories::new();
    let ch = channel(3);

    histories
        .seed(
            ch,
            vec![
                ConversationTurn::user("replayed 1"),
                ConversationTurn::assistant("replayed 2"),
            ],
        )
        .await;
    assert_eq!(histories.len(ch).await, 2);

    // A second seed must not clobber live turns.
    histories.append(ch, ConversationTurn::user("live")).await;
    histories
        .seed(ch, vec![ConversationTurn::user("late seed")])
        .await;
    let turns = histories.completion_turns(ch).await;
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[3].content, "live");
}

#[tokio::test]
async fn channels_are_isolated() {
    let histories = ChannelHistories::new();
    histories
        .append(channel(4), ConversationTurn::user("a"))
        .await;
    histories
        .append(channel(5), ConversationTurn::user("b"))
        .await;
    assert_eq!(histories.len(channel(4)).await, 1);
    assert_eq!(histories.len(channel(5)).await, 1);
    assert_eq!(histories.completion_turns(channel(4)).await[1].content, "a");
}
