use super::super::persist::PersistError;
use super::super::types::{AccountId, DELETION_VOTE_THRESHOLD, PROMOTION_VOTE_THRESHOLD};
use super::types::{ForumEvent, ForumEventKind};
use super::ForumKernel;

impl ForumKernel {
    pub(super) fn apply_event(&mut self, event: &ForumEvent) -> Result<(), PersistError> {
        if event.id != self.next_event_id {
            return Err(PersistError::ReplayConflict {
                message: format!(
                    "event id mismatch: expected {}, got {}",
                    self.next_event_id, event.id
                ),
            });
        }
        if event.time < self.time {
            return Err(PersistError::ReplayConflict {
                message: format!(
                    "event time regression: current {}, got {}",
                    self.time, event.time
                ),
            });
        }
        self.time = event.time;
        self.next_event_id = self.next_event_id.saturating_add(1);

        match &event.kind {
            ForumEventKind::AccountRegistered { account } => {
                if self.model.accounts.contains_key(&account.id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("account already exists: {}", account.id),
                    });
                }
                if self.model.account_by_username(&account.username).is_some() {
                    return Err(PersistError::ReplayConflict {
                        message: format!("username already taken: {}", account.username),
                    });
                }
                self.model
                    .accounts
                    .insert(account.id.clone(), account.clone());
                self.model.session.current_user = Some(account.id.clone());
            }
            ForumEventKind::SessionStarted { account_id } => {
                if !self.model.accounts.contains_key(account_id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("account not found: {account_id}"),
                    });
                }
                self.model.session.current_user = Some(account_id.clone());
            }
            ForumEventKind::SessionEnded { account_id } => {
                if self.model.session.current_user.as_ref() != Some(account_id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("no active session for: {account_id}"),
                    });
                }
                self.model.session.current_user = None;
            }
            ForumEventKind::PostCreated { post } => {
                if self.model.posts.contains_key(&post.id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post already exists: {}", post.id),
                    });
                }
                self.charge_gas_for_replay(&post.author, post.gas_spent)?;
                self.model.next_post_id =
                    self.model.next_post_id.max(post.id.saturating_add(1));
                self.model.posts.insert(post.id, post.clone());
            }
            ForumEventKind::CommentAdded {
                post_id,
                comment,
                fee,
            } => {
                if !self.model.posts.contains_key(post_id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                }
                self.charge_gas_for_replay(&comment.author, *fee)?;
                self.model.next_comment_id =
                    self.model.next_comment_id.max(comment.id.saturating_add(1));
                let Some(post) = self.model.posts.get_mut(post_id) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                };
                post.comments.push(comment.clone());
            }
            ForumEventKind::PostDownvoted {
                voter,
                post_id,
                downvotes,
                fee,
            } => {
                if !self.model.posts.contains_key(post_id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                }
                self.charge_gas_for_replay(voter, *fee)?;
                let Some(post) = self.model.posts.get_mut(post_id) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                };
                post.downvotes = post.downvotes.saturating_add(1);
                if post.downvotes != *downvotes {
                    return Err(PersistError::ReplayConflict {
                        message: format!(
                            "downvote count mismatch on post {post_id}: expected {}, got {}",
                            downvotes, post.downvotes
                        ),
                    });
                }
            }
            ForumEventKind::PostTipped {
                payer,
                author,
                post_id,
                amount,
            } => {
                if !self.model.posts.contains_key(post_id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                }
                self.debit_for_replay(payer, *amount)?;
                self.credit_for_replay(author, *amount)?;
                let Some(post) = self.model.posts.get_mut(post_id) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                };
                post.tips = post.tips.saturating_add(*amount);
            }
            ForumEventKind::PromotionVoteCast {
                voter,
                post_id,
                promotion_votes,
                promoted,
                fee,
            } => {
                if !self.model.posts.contains_key(post_id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                }
                self.charge_gas_for_replay(voter, *fee)?;
                let Some(post) = self.model.posts.get_mut(post_id) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                };
                post.promotion_votes = post.promotion_votes.saturating_add(1);
                if post.promotion_votes >= PROMOTION_VOTE_THRESHOLD {
                    post.promoted = true;
                }
                if post.promotion_votes != *promotion_votes || post.promoted != *promoted {
                    return Err(PersistError::ReplayConflict {
                        message: format!(
                            "promotion state mismatch on post {post_id}: expected {} votes (promoted {}), got {} votes (promoted {})",
                            promotion_votes, promoted, post.promotion_votes, post.promoted
                        ),
                    });
                }
            }
            ForumEventKind::DeletionVoteCast {
                voter,
                post_id,
                deletion_votes,
                deleted,
                fee,
            } => {
                if !self.model.posts.contains_key(post_id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                }
                self.charge_gas_for_replay(voter, *fee)?;
                let Some(post) = self.model.posts.get_mut(post_id) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("post not found: {post_id}"),
                    });
                };
                post.deletion_votes = post.deletion_votes.saturating_add(1);
                let reached = post.deletion_votes >= DELETION_VOTE_THRESHOLD;
                if post.deletion_votes != *deletion_votes || reached != *deleted {
                    return Err(PersistError::ReplayConflict {
                        message: format!(
                            "deletion state mismatch on post {post_id}: expected {} votes (deleted {}), got {} votes (deleted {})",
                            deletion_votes, deleted, post.deletion_votes, reached
                        ),
                    });
                }
                if reached {
                    self.model.posts.remove(post_id);
                }
            }
            ForumEventKind::EventCreated { event } => {
                if self.model.events.contains_key(&event.id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("campus event already exists: {}", event.id),
                    });
                }
                if !self.model.accounts.contains_key(&event.creator) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("account not found: {}", event.creator),
                    });
                }
                self.model.next_campus_event_id = self
                    .model
                    .next_campus_event_id
                    .max(event.id.saturating_add(1));
                self.model.events.insert(event.id, event.clone());
            }
            ForumEventKind::EventVoteCast {
                voter,
                event_id,
                amount,
                support,
                total_stake,
            } => {
                if *amount <= 0 {
                    return Err(PersistError::ReplayConflict {
                        message: "event stake must be positive".to_string(),
                    });
                }
                if !self.model.events.contains_key(event_id) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("campus event not found: {event_id}"),
                    });
                }
                self.debit_for_replay(voter, *amount)?;
                let Some(campus_event) = self.model.events.get_mut(event_id) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("campus event not found: {event_id}"),
                    });
                };
                let vote = super::super::model::EventVote {
                    voter: voter.clone(),
                    amount: *amount,
                };
                if *support {
                    campus_event.supporters.push(vote);
                } else {
                    campus_event.opposers.push(vote);
                }
                campus_event.total_stake = campus_event.total_stake.saturating_add(*amount);
                if campus_event.total_stake != *total_stake {
                    return Err(PersistError::ReplayConflict {
                        message: format!(
                            "stake mismatch on campus event {event_id}: expected {}, got {}",
                            total_stake, campus_event.total_stake
                        ),
                    });
                }
            }
            ForumEventKind::FriendRequestSent { requester, target } => {
                if !self.model.accounts.contains_key(requester) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("account not found: {requester}"),
                    });
                }
                let Some(target_account) = self.model.accounts.get_mut(target) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("account not found: {target}"),
                    });
                };
                if !target_account.friend_requests.insert(requester.clone()) {
                    return Err(PersistError::ReplayConflict {
                        message: format!(
                            "friend request already pending: {requester} -> {target}"
                        ),
                    });
                }
            }
            ForumEventKind::FriendRequestAccepted { requester, target } => {
                if !self.model.accounts.contains_key(requester) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("account not found: {requester}"),
                    });
                }
                let Some(target_account) = self.model.accounts.get_mut(target) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("account not found: {target}"),
                    });
                };
                if !target_account.friend_requests.remove(requester) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("friend request not found: {requester} -> {target}"),
                    });
                }
                target_account.friends.insert(requester.clone());
                if let Some(requester_account) = self.model.accounts.get_mut(requester) {
                    requester_account.friends.insert(target.clone());
                }
            }
            ForumEventKind::FriendRequestRejected { requester, target } => {
                let Some(target_account) = self.model.accounts.get_mut(target) else {
                    return Err(PersistError::ReplayConflict {
                        message: format!("account not found: {target}"),
                    });
                };
                if !target_account.friend_requests.remove(requester) {
                    return Err(PersistError::ReplayConflict {
                        message: format!("friend request not found: {requester} -> {target}"),
                    });
                }
            }
            ForumEventKind::ActionRejected { .. } => {}
        }

        Ok(())
    }

    fn charge_gas_for_replay(
        &mut self,
        account_id: &AccountId,
        fee: i64,
    ) -> Result<(), PersistError> {
        if fee < 0 {
            return Err(PersistError::ReplayConflict {
                message: format!("invalid gas fee: {fee}"),
            });
        }
        self.charge_gas(account_id, fee)
            .map_err(|reason| PersistError::ReplayConflict {
                message: format!("failed to apply gas fee: {reason:?}"),
            })
    }

    fn debit_for_replay(
        &mut self,
        account_id: &AccountId,
        amount: i64,
    ) -> Result<(), PersistError> {
        self.debit_balance(account_id, amount)
            .map_err(|reason| PersistError::ReplayConflict {
                message: format!("failed to apply debit: {reason:?}"),
            })
    }

    fn credit_for_replay(
        &mut self,
        account_id: &AccountId,
        amount: i64,
    ) -> Result<(), PersistError> {
        self.credit_balance(account_id, amount)
            .map_err(|reason| PersistError::ReplayConflict {
                message: format!("failed to apply credit: {reason:?}"),
            })
    }
}
