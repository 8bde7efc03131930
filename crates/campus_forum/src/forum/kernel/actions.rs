use super::super::model::{Account, CampusEvent, Comment, EventVote, Post};
use super::super::types::{
    credential_digest, AccountId, Action, BalanceError, EventId, PostId,
    DELETION_VOTE_THRESHOLD, MIN_CREDENTIAL_CHARS, PROMOTION_VOTE_THRESHOLD,
};
use super::types::{ForumEventKind, RejectReason};
use super::ForumKernel;

impl ForumKernel {
    pub(super) fn apply_action(&mut self, action: Action) -> ForumEventKind {
        match action {
            Action::RegisterAccount {
                account_id,
                username,
                credential,
            } => self.apply_register_account(account_id, username, credential),
            Action::Login {
                username,
                credential,
            } => self.apply_login(username, credential),
            Action::Logout => self.apply_logout(),
            Action::CreatePost {
                author,
                title,
                body,
                category,
            } => self.apply_create_post(author, title, body, category),
            Action::AddComment {
                author,
                post_id,
                body,
            } => self.apply_add_comment(author, post_id, body),
            Action::DownvotePost { voter, post_id } => self.apply_downvote_post(voter, post_id),
            Action::TipPost {
                payer,
                post_id,
                amount,
            } => self.apply_tip_post(payer, post_id, amount),
            Action::VotePromotion { voter, post_id } => {
                self.apply_vote_promotion(voter, post_id)
            }
            Action::VoteDeletion { voter, post_id } => self.apply_vote_deletion(voter, post_id),
            Action::CreateEvent {
                creator,
                title,
                description,
            } => self.apply_create_event(creator, title, description),
            Action::VoteOnEvent {
                voter,
                event_id,
                amount,
                support,
            } => self.apply_vote_on_event(voter, event_id, amount, support),
            Action::SendFriendRequest { requester, target } => {
                self.apply_send_friend_request(requester, target)
            }
            Action::AcceptFriendRequest { target, requester } => {
                self.apply_accept_friend_request(target, requester)
            }
            Action::RejectFriendRequest { target, requester } => {
                self.apply_reject_friend_request(target, requester)
            }
        }
    }

    // ------------------------------------------------------------------
    // Accounts and sessions
    // ------------------------------------------------------------------

    fn apply_register_account(
        &mut self,
        account_id: AccountId,
        username: String,
        credential: String,
    ) -> ForumEventKind {
        let username = username.trim().to_string();
        if username.is_empty() {
            return reject_empty_field("username");
        }
        if credential.chars().count() < MIN_CREDENTIAL_CHARS {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::CredentialTooShort {
                    min_chars: MIN_CREDENTIAL_CHARS,
                },
            };
        }
        if self.model.accounts.contains_key(&account_id) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountAlreadyExists { account_id },
            };
        }
        if self.model.account_by_username(&username).is_some() {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::UsernameTaken { username },
            };
        }

        let account = Account::new(
            account_id.clone(),
            username,
            credential_digest(&credential),
            self.config.economy.initial_balance,
        );
        self.model.accounts.insert(account_id.clone(), account.clone());
        self.model.session.current_user = Some(account_id);
        ForumEventKind::AccountRegistered { account }
    }

    fn apply_login(&mut self, username: String, credential: String) -> ForumEventKind {
        let Some(account) = self.model.account_by_username(&username) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::UnknownUsername { username },
            };
        };
        if account.credential != credential_digest(&credential) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::CredentialMismatch { username },
            };
        }
        let account_id = account.id.clone();
        self.model.session.current_user = Some(account_id.clone());
        ForumEventKind::SessionStarted { account_id }
    }

    fn apply_logout(&mut self) -> ForumEventKind {
        let Some(account_id) = self.model.session.current_user.take() else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::NoActiveSession,
            };
        };
        ForumEventKind::SessionEnded { account_id }
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    fn apply_create_post(
        &mut self,
        author: AccountId,
        title: String,
        body: String,
        category: String,
    ) -> ForumEventKind {
        let title = title.trim().to_string();
        if title.is_empty() {
            return reject_empty_field("title");
        }
        let body = body.trim().to_string();
        if body.is_empty() {
            return reject_empty_field("body");
        }
        let category = category.trim().to_string();
        if category.is_empty() {
            return reject_empty_field("category");
        }

        let fee = self.config.economy.post_gas_fee;
        if let Err(reason) = self.charge_gas(&author, fee) {
            return ForumEventKind::ActionRejected { reason };
        }

        let post_id = self.model.next_post_id.max(1);
        self.model.next_post_id = post_id.saturating_add(1);
        let post = Post::new(post_id, author, title, body, category, self.time, fee);
        self.model.posts.insert(post_id, post.clone());
        ForumEventKind::PostCreated { post }
    }

    fn apply_add_comment(
        &mut self,
        author: AccountId,
        post_id: PostId,
        body: String,
    ) -> ForumEventKind {
        let body = body.trim().to_string();
        if body.is_empty() {
            return reject_empty_field("body");
        }
        if !self.model.posts.contains_key(&post_id) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        }

        let fee = self.config.economy.comment_gas_fee;
        if let Err(reason) = self.charge_gas(&author, fee) {
            return ForumEventKind::ActionRejected { reason };
        }

        let comment_id = self.model.next_comment_id.max(1);
        self.model.next_comment_id = comment_id.saturating_add(1);
        let comment = Comment {
            id: comment_id,
            author,
            post_id,
            body,
            created_at: self.time,
            tips: 0,
        };
        let Some(post) = self.model.posts.get_mut(&post_id) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        };
        post.comments.push(comment.clone());
        ForumEventKind::CommentAdded {
            post_id,
            comment,
            fee,
        }
    }

    fn apply_downvote_post(&mut self, voter: AccountId, post_id: PostId) -> ForumEventKind {
        let Some(post) = self.model.posts.get(&post_id) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        };
        if post.author == voter {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::SelfActionNotAllowed {
                    account_id: voter,
                    post_id,
                },
            };
        }

        let fee = self.config.economy.downvote_gas_fee;
        if let Err(reason) = self.charge_gas(&voter, fee) {
            return ForumEventKind::ActionRejected { reason };
        }
        let Some(post) = self.model.posts.get_mut(&post_id) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        };
        post.downvotes = post.downvotes.saturating_add(1);
        ForumEventKind::PostDownvoted {
            voter,
            post_id,
            downvotes: post.downvotes,
            fee,
        }
    }

    fn apply_tip_post(
        &mut self,
        payer: AccountId,
        post_id: PostId,
        amount: i64,
    ) -> ForumEventKind {
        if amount <= 0 {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::InvalidAmount { amount },
            };
        }
        let author = match self.model.posts.get(&post_id) {
            Some(post) => post.author.clone(),
            None => {
                return ForumEventKind::ActionRejected {
                    reason: RejectReason::PostNotFound { post_id },
                };
            }
        };
        if author == payer {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::SelfActionNotAllowed {
                    account_id: payer,
                    post_id,
                },
            };
        }
        if !self.model.accounts.contains_key(&author) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound { account_id: author },
            };
        }

        if let Err(reason) = self.debit_balance(&payer, amount) {
            return ForumEventKind::ActionRejected { reason };
        }
        if let Err(reason) = self.credit_balance(&author, amount) {
            return ForumEventKind::ActionRejected { reason };
        }
        let Some(post) = self.model.posts.get_mut(&post_id) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        };
        post.tips = post.tips.saturating_add(amount);
        ForumEventKind::PostTipped {
            payer,
            author,
            post_id,
            amount,
        }
    }

    fn apply_vote_promotion(&mut self, voter: AccountId, post_id: PostId) -> ForumEventKind {
        if !self.model.posts.contains_key(&post_id) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        }

        let fee = self.config.economy.promote_vote_gas_fee;
        if let Err(reason) = self.charge_gas(&voter, fee) {
            return ForumEventKind::ActionRejected { reason };
        }
        let Some(post) = self.model.posts.get_mut(&post_id) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        };
        post.promotion_votes = post.promotion_votes.saturating_add(1);
        if post.promotion_votes >= PROMOTION_VOTE_THRESHOLD {
            // One-way transition: never unset by later votes.
            post.promoted = true;
        }
        ForumEventKind::PromotionVoteCast {
            voter,
            post_id,
            promotion_votes: post.promotion_votes,
            promoted: post.promoted,
            fee,
        }
    }

    fn apply_vote_deletion(&mut self, voter: AccountId, post_id: PostId) -> ForumEventKind {
        let Some(post) = self.model.posts.get(&post_id) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        };
        if post.author == voter {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::SelfActionNotAllowed {
                    account_id: voter,
                    post_id,
                },
            };
        }

        let fee = self.config.economy.delete_vote_gas_fee;
        if let Err(reason) = self.charge_gas(&voter, fee) {
            return ForumEventKind::ActionRejected { reason };
        }
        let Some(post) = self.model.posts.get_mut(&post_id) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::PostNotFound { post_id },
            };
        };
        post.deletion_votes = post.deletion_votes.saturating_add(1);
        let deletion_votes = post.deletion_votes;
        let deleted = deletion_votes >= DELETION_VOTE_THRESHOLD;
        if deleted {
            // Hard delete: comments and tip history go with the post.
            self.model.posts.remove(&post_id);
        }
        ForumEventKind::DeletionVoteCast {
            voter,
            post_id,
            deletion_votes,
            deleted,
            fee,
        }
    }

    // ------------------------------------------------------------------
    // Campus events
    // ------------------------------------------------------------------

    fn apply_create_event(
        &mut self,
        creator: AccountId,
        title: String,
        description: String,
    ) -> ForumEventKind {
        let title = title.trim().to_string();
        if title.is_empty() {
            return reject_empty_field("title");
        }
        let description = description.trim().to_string();
        if description.is_empty() {
            return reject_empty_field("description");
        }
        if !self.model.accounts.contains_key(&creator) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::AccountNotFound {
                    account_id: creator,
                },
            };
        }

        let event_id = self.model.next_campus_event_id.max(1);
        self.model.next_campus_event_id = event_id.saturating_add(1);
        let event = CampusEvent::new(event_id, creator, title, description, self.time);
        self.model.events.insert(event_id, event.clone());
        ForumEventKind::EventCreated { event }
    }

    fn apply_vote_on_event(
        &mut self,
        voter: AccountId,
        event_id: EventId,
        amount: i64,
        support: bool,
    ) -> ForumEventKind {
        if amount <= 0 {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::InvalidAmount { amount },
            };
        }
        if !self.model.events.contains_key(&event_id) {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::EventNotFound { event_id },
            };
        }

        // Stake is burned, not transferred to the event creator.
        if let Err(reason) = self.debit_balance(&voter, amount) {
            return ForumEventKind::ActionRejected { reason };
        }
        let Some(event) = self.model.events.get_mut(&event_id) else {
            return ForumEventKind::ActionRejected {
                reason: RejectReason::EventNotFound { event_id },
            };
        };
        let vote = EventVote {
            voter: voter.clone(),
            amount,
        };
        if support {
            event.supporters.push(vote);
        } else {
            event.opposers.push(vote);
        }
        event.total_stake = event.total_stake.saturating_add(amount);
        ForumEventKind::EventVoteCast {
            voter,
            event_id,
            amount,
            support,
            total_stake: event.total_stake,
        }
    }

    // ------------------------------------------------------------------
    // Ledger helpers
    // ------------------------------------------------------------------

    /// Burn a fixed gas fee: debit the balance and track it in `gas_spent`.
    /// The fee is not credited to anyone.
    pub(super) fn charge_gas(
        &mut self,
        account_id: &AccountId,
        fee: i64,
    ) -> Result<(), RejectReason> {
        let Some(account) = self.model.accounts.get_mut(account_id) else {
            return Err(RejectReason::AccountNotFound {
                account_id: account_id.clone(),
            });
        };
        if let Err(err) = account.debit(fee) {
            return Err(map_balance_error(account_id, err));
        }
        account.gas_spent = account.gas_spent.saturating_add(fee);
        Ok(())
    }

    pub(super) fn debit_balance(
        &mut self,
        account_id: &AccountId,
        amount: i64,
    ) -> Result<(), RejectReason> {
        let Some(account) = self.model.accounts.get_mut(account_id) else {
            return Err(RejectReason::AccountNotFound {
                account_id: account_id.clone(),
            });
        };
        account
            .debit(amount)
            .map_err(|err| map_balance_error(account_id, err))
    }

    pub(super) fn credit_balance(
        &mut self,
        account_id: &AccountId,
        amount: i64,
    ) -> Result<(), RejectReason> {
        let Some(account) = self.model.accounts.get_mut(account_id) else {
            return Err(RejectReason::AccountNotFound {
                account_id: account_id.clone(),
            });
        };
        account
            .credit(amount)
            .map_err(|err| map_balance_error(account_id, err))
    }
}

fn map_balance_error(account_id: &AccountId, err: BalanceError) -> RejectReason {
    match err {
        BalanceError::NegativeAmount { amount } => RejectReason::InvalidAmount { amount },
        BalanceError::Insufficient {
            requested,
            available,
        } => RejectReason::InsufficientBalance {
            account_id: account_id.clone(),
            requested,
            available,
        },
    }
}

fn reject_empty_field(field: &str) -> ForumEventKind {
    ForumEventKind::ActionRejected {
        reason: RejectReason::EmptyField {
            field: field.to_string(),
        },
    }
}
