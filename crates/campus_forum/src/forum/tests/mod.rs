//! Tests for the forum module.

use super::*;
use std::fs;

const TEST_CREDENTIAL: &str = "pass-1234";

fn registered_kernel(account_ids: &[&str]) -> ForumKernel {
    let mut kernel = ForumKernel::new();
    for account_id in account_ids {
        kernel.submit_action(Action::RegisterAccount {
            account_id: account_id.to_string(),
            username: format!("user-{account_id}"),
            credential: TEST_CREDENTIAL.to_string(),
        });
    }
    kernel.step_until_empty();
    kernel
}

fn create_post(kernel: &mut ForumKernel, author: &str, title: &str, category: &str) -> PostId {
    kernel.submit_action(Action::CreatePost {
        author: author.to_string(),
        title: title.to_string(),
        body: format!("{title} body"),
        category: category.to_string(),
    });
    let events = kernel.step_until_empty();
    match &events.last().expect("post event").kind {
        ForumEventKind::PostCreated { post } => post.id,
        other => panic!("unexpected event: {other:?}"),
    }
}

fn create_event(kernel: &mut ForumKernel, creator: &str, title: &str) -> EventId {
    kernel.submit_action(Action::CreateEvent {
        creator: creator.to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
    });
    let events = kernel.step_until_empty();
    match &events.last().expect("event event").kind {
        ForumEventKind::EventCreated { event } => event.id,
        other => panic!("unexpected event: {other:?}"),
    }
}

fn balance(kernel: &ForumKernel, account_id: &str) -> i64 {
    kernel
        .model()
        .accounts
        .get(account_id)
        .expect("account exists")
        .balance
}

fn gas_spent(kernel: &ForumKernel, account_id: &str) -> i64 {
    kernel
        .model()
        .accounts
        .get(account_id)
        .expect("account exists")
        .gas_spent
}

fn last_kind(events: &[ForumEvent]) -> &ForumEventKind {
    &events.last().expect("at least one event").kind
}

mod ranking;
mod social;
