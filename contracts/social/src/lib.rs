#![no_std]

//! Community feed: posts, comments, drink reviews and what's trending.

mod storage;
pub mod types;

use loyalty_core::{Activity, LedgerClient};
use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol, Vec};

use crate::storage::*;
use crate::types::*;

const SECONDS_PER_DAY: u64 = 86_400;
const MAX_TEXT_LEN: u32 = 500;
const MAX_RATING: u32 = 5;

#[contract]
pub struct Social;

#[contractimpl]
impl Social {
    pub fn initialize(
        env: Env,
        admin: Address,
        ledger: Address,
        post_reward: i128,
        max_rewarded_posts_per_day: u32,
    ) -> Result<(), SocialError> {
        if has_config(&env) {
            return Err(SocialError::AlreadyInitialized);
        }
        admin.require_auth();

        let config = SocialConfig {
            admin: admin.clone(),
            ledger,
            post_reward,
            max_rewarded_posts_per_day,
        };
        if config.post_reward < 0 {
            return Err(SocialError::InvalidConfig);
        }
        set_config(&env, &config);

        env.events().publish(
            (Symbol::new(&env, "init"), Symbol::new(&env, "social")),
            (admin, post_reward, max_rewarded_posts_per_day),
        );
        Ok(())
    }

    pub fn update_config(env: Env, admin: Address, config: SocialConfig) -> Result<(), SocialError> {
        admin.require_auth();
        if get_config(&env)?.admin != admin {
            return Err(SocialError::Unauthorized);
        }
        if config.post_reward < 0 {
            return Err(SocialError::InvalidConfig);
        }
        set_config(&env, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<SocialConfig, SocialError> {
        get_config(&env)
    }

    // ───────────── POSTS ─────────────

    /// Publish a post. The first `max_rewarded_posts_per_day` posts of a day
    /// earn `post_reward`; later ones earn nothing.
    pub fn create_post(
        env: Env,
        author: Address,
        text: String,
        drink: Option<Symbol>,
        hashtags: Vec<Symbol>,
    ) -> Result<u64, SocialError> {
        author.require_auth();
        let config = get_config(&env)?;
        Self::check_text(&text)?;

        let now = env.ledger().timestamp();
        let posted_today = bump_daily_posts(&env, &author, now / SECONDS_PER_DAY);
        let points_earned = if posted_today <= config.max_rewarded_posts_per_day {
            config.post_reward
        } else {
            0
        };

        let post = Post {
            id: next_post_id(&env),
            author: author.clone(),
            text,
            drink,
            hashtags,
            likes: 0,
            comments: 0,
            shares: 0,
            points_earned,
            created_at: now,
        };
        set_post(&env, &post);
        push_author_post(&env, &author, post.id);
        if let Some(drink) = &post.drink {
            record_mention(&env, drink, None);
        }

        if points_earned > 0 {
            LedgerClient::new(&env, &config.ledger).credit(
                &env.current_contract_address(),
                &author,
                &points_earned,
                &Activity::Post,
            );
        }

        env.events().publish(
            (Symbol::new(&env, "post_created"), author),
            (post.id, points_earned),
        );
        Ok(post.id)
    }

    /// Like or unlike. Returns whether the member likes the post afterwards.
    pub fn like_post(env: Env, member: Address, post_id: u64) -> Result<bool, SocialError> {
        member.require_auth();
        let mut post = get_post(&env, post_id).ok_or(SocialError::PostNotFound)?;

        let liked = !has_liked(&env, post_id, &member);
        if liked {
            post.likes += 1;
        } else {
            post.likes = post.likes.saturating_sub(1);
        }
        set_liked(&env, post_id, &member, liked);
        set_post(&env, &post);
        Ok(liked)
    }

    pub fn comment_post(env: Env, member: Address, post_id: u64, text: String) -> Result<u32, SocialError> {
        member.require_auth();
        Self::check_text(&text)?;
        let mut post = get_post(&env, post_id).ok_or(SocialError::PostNotFound)?;

        let mut comments = get_comments(&env, post_id);
        comments.push_back(Comment {
            author: member,
            text,
            created_at: env.ledger().timestamp(),
        });
        set_comments(&env, post_id, &comments);

        post.comments = comments.len();
        set_post(&env, &post);
        Ok(post.comments)
    }

    pub fn share_post(env: Env, member: Address, post_id: u64) -> Result<u32, SocialError> {
        member.require_auth();
        let mut post = get_post(&env, post_id).ok_or(SocialError::PostNotFound)?;
        post.shares += 1;
        set_post(&env, &post);
        Ok(post.shares)
    }

    pub fn get_post(env: Env, post_id: u64) -> Option<Post> {
        get_post(&env, post_id)
    }

    pub fn comments(env: Env, post_id: u64) -> Vec<Comment> {
        get_comments(&env, post_id)
    }

    /// Latest posts, newest first.
    pub fn feed(env: Env, limit: u32) -> Vec<Post> {
        let mut posts = Vec::new(&env);
        let mut id = post_count(&env);
        while id > 0 && posts.len() < limit {
            if let Some(post) = get_post(&env, id) {
                posts.push_back(post);
            }
            id -= 1;
        }
        posts
    }

    /// Newest first.
    pub fn posts_by(env: Env, author: Address) -> Vec<Post> {
        let mut posts = Vec::new(&env);
        for id in get_author_posts(&env, &author).iter().rev() {
            if let Some(post) = get_post(&env, id) {
                posts.push_back(post);
            }
        }
        posts
    }

    // ───────────── REVIEWS ─────────────

    pub fn add_review(
        env: Env,
        member: Address,
        drink: Symbol,
        rating: u32,
        text: String,
    ) -> Result<u64, SocialError> {
        member.require_auth();
        get_config(&env)?;
        if rating == 0 || rating > MAX_RATING {
            return Err(SocialError::InvalidRating);
        }
        if text.len() > MAX_TEXT_LEN {
            return Err(SocialError::TextTooLong);
        }

        let review = Review {
            id: next_review_id(&env),
            author: member.clone(),
            drink: drink.clone(),
            rating,
            text,
            helpful: 0,
            created_at: env.ledger().timestamp(),
        };
        set_review(&env, &review);
        record_mention(&env, &drink, Some(rating));

        env.events().publish(
            (Symbol::new(&env, "review_added"), member),
            (review.id, drink, rating),
        );
        Ok(review.id)
    }

    pub fn mark_helpful(env: Env, member: Address, review_id: u64) -> Result<u32, SocialError> {
        member.require_auth();
        let mut review = get_review(&env, review_id).ok_or(SocialError::ReviewNotFound)?;
        if review.author == member {
            return Err(SocialError::OwnReview);
        }
        if has_marked_helpful(&env, review_id, &member) {
            return Err(SocialError::AlreadyMarkedHelpful);
        }

        set_marked_helpful(&env, review_id, &member);
        review.helpful += 1;
        set_review(&env, &review);
        Ok(review.helpful)
    }

    pub fn get_review(env: Env, review_id: u64) -> Option<Review> {
        get_review(&env, review_id)
    }

    /// Latest reviews, newest first.
    pub fn reviews(env: Env, limit: u32) -> Vec<Review> {
        let mut reviews = Vec::new(&env);
        let mut id = review_count(&env);
        while id > 0 && reviews.len() < limit {
            if let Some(review) = get_review(&env, id) {
                reviews.push_back(review);
            }
            id -= 1;
        }
        reviews
    }

    // ───────────── TRENDING ─────────────

    /// Most mentioned drinks first; ties keep the order drinks were first mentioned.
    pub fn trending(env: Env, limit: u32) -> Vec<TrendingDrink> {
        let mut ranked: Vec<TrendingDrink> = Vec::new(&env);
        for drink in get_drinks(&env).iter() {
            let stats = get_drink_stats(&env, &drink);
            let entry = TrendingDrink {
                drink,
                mentions: stats.mentions,
                avg_rating_x100: if stats.ratings == 0 {
                    0
                } else {
                    stats.rating_sum * 100 / stats.ratings
                },
            };

            let mut index = ranked.len();
            while index > 0 && ranked.get_unchecked(index - 1).mentions < entry.mentions {
                index -= 1;
            }
            ranked.insert(index, entry);
        }

        while ranked.len() > limit {
            ranked.pop_back();
        }
        ranked
    }

    // ───────────── HELPERS ─────────────

    fn check_text(text: &String) -> Result<(), SocialError> {
        if text.is_empty() {
            return Err(SocialError::EmptyText);
        }
        if text.len() > MAX_TEXT_LEN {
            return Err(SocialError::TextTooLong);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test;
