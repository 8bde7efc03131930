use super::*;

fn friends(kernel: &ForumKernel, account_id: &str) -> Vec<String> {
    kernel
        .model()
        .accounts
        .get(account_id)
        .expect("account exists")
        .friends
        .iter()
        .cloned()
        .collect()
}

fn pending(kernel: &ForumKernel, account_id: &str) -> Vec<String> {
    kernel
        .model()
        .accounts
        .get(account_id)
        .expect("account exists")
        .friend_requests
        .iter()
        .cloned()
        .collect()
}

#[test]
fn request_and_accept_makes_mutual_friends() {
    let mut kernel = registered_kernel(&["alice", "bob"]);

    kernel.submit_action(Action::SendFriendRequest {
        requester: "alice".to_string(),
        target: "bob".to_string(),
    });
    let events = kernel.step_until_empty();
    assert!(matches!(
        last_kind(&events),
        ForumEventKind::FriendRequestSent { .. }
    ));
    assert_eq!(pending(&kernel, "bob"), vec!["alice".to_string()]);
    assert!(friends(&kernel, "alice").is_empty());

    kernel.submit_action(Action::AcceptFriendRequest {
        target: "bob".to_string(),
        requester: "alice".to_string(),
    });
    let events = kernel.step_until_empty();
    assert!(matches!(
        last_kind(&events),
        ForumEventKind::FriendRequestAccepted { .. }
    ));
    assert_eq!(friends(&kernel, "alice"), vec!["bob".to_string()]);
    assert_eq!(friends(&kernel, "bob"), vec!["alice".to_string()]);
    assert!(pending(&kernel, "bob").is_empty());
}

#[test]
fn reject_clears_request_without_friendship() {
    let mut kernel = registered_kernel(&["alice", "bob"]);
    kernel.submit_action(Action::SendFriendRequest {
        requester: "alice".to_string(),
        target: "bob".to_string(),
    });
    kernel.submit_action(Action::RejectFriendRequest {
        target: "bob".to_string(),
        requester: "alice".to_string(),
    });
    let events = kernel.step_until_empty();
    assert!(matches!(
        last_kind(&events),
        ForumEventKind::FriendRequestRejected { .. }
    ));
    assert!(pending(&kernel, "bob").is_empty());
    assert!(friends(&kernel, "alice").is_empty());
    assert!(friends(&kernel, "bob").is_empty());
}

#[test]
fn self_request_rejected() {
    let mut kernel = registered_kernel(&["alice"]);
    kernel.submit_action(Action::SendFriendRequest {
        requester: "alice".to_string(),
        target: "alice".to_string(),
    });
    let events = kernel.step_until_empty();
    assert!(matches!(
        last_kind(&events),
        ForumEventKind::ActionRejected {
            reason: RejectReason::SelfFriendRequest { .. }
        }
    ));
}

#[test]
fn duplicate_request_rejected() {
    let mut kernel = registered_kernel(&["alice", "bob"]);
    kernel.submit_action(Action::SendFriendRequest {
        requester: "alice".to_string(),
        target: "bob".to_string(),
    });
    kernel.submit_action(Action::SendFriendRequest {
        requester: "alice".to_string(),
        target: "bob".to_string(),
    });
    let events = kernel.step_until_empty();
    assert!(matches!(
        last_kind(&events),
        ForumEventKind::ActionRejected {
            reason: RejectReason::FriendRequestAlreadyPending { .. }
        }
    ));
    assert_eq!(pending(&kernel, "bob").len(), 1);
}

#[test]
fn request_to_existing_friend_rejected() {
    let mut kernel = registered_kernel(&["alice", "bob"]);
    kernel.submit_action(Action::SendFriendRequest {
        requester: "alice".to_string(),
        target: "bob".to_string(),
    });
    kernel.submit_action(Action::AcceptFriendRequest {
        target: "bob".to_string(),
        requester: "alice".to_string(),
    });
    kernel.submit_action(Action::SendFriendRequest {
        requester: "alice".to_string(),
        target: "bob".to_string(),
    });
    let events = kernel.step_until_empty();
    assert!(matches!(
        last_kind(&events),
        ForumEventKind::ActionRejected {
            reason: RejectReason::AlreadyFriends { .. }
        }
    ));
}

#[test]
fn accept_without_pending_request_rejected() {
    let mut kernel = registered_kernel(&["alice", "bob"]);
    kernel.submit_action(Action::AcceptFriendRequest {
        target: "bob".to_string(),
        requester: "alice".to_string(),
    });
    let events = kernel.step_until_empty();
    assert!(matches!(
        last_kind(&events),
        ForumEventKind::ActionRejected {
            reason: RejectReason::FriendRequestNotFound { .. }
        }
    ));
    assert!(friends(&kernel, "alice").is_empty());
}

#[test]
fn requests_involving_unknown_accounts_rejected() {
    let mut kernel = registered_kernel(&["alice"]);
    kernel.submit_action(Action::SendFriendRequest {
        requester: "alice".to_string(),
        target: "ghost".to_string(),
    });
    kernel.submit_action(Action::SendFriendRequest {
        requester: "ghost".to_string(),
        target: "alice".to_string(),
    });
    let events = kernel.step_until_empty();
    for event in &events {
        assert!(matches!(
            event.kind,
            ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound { .. }
            }
        ));
    }
}
