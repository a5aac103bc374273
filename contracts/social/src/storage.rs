use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::types::{Comment, DataKey, DrinkStats, Post, Review, SocialConfig, SocialError};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &SocialConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<SocialConfig, SocialError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(SocialError::NotInitialized)
}

// Posts

pub fn post_count(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::PostCounter).unwrap_or(0)
}

pub fn next_post_id(env: &Env) -> u64 {
    let id = post_count(env) + 1;
    env.storage().instance().set(&DataKey::PostCounter, &id);
    id
}

pub fn get_post(env: &Env, id: u64) -> Option<Post> {
    env.storage().persistent().get(&DataKey::Post(id))
}

pub fn set_post(env: &Env, post: &Post) {
    env.storage().persistent().set(&DataKey::Post(post.id), post);
}

pub fn has_liked(env: &Env, id: u64, member: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Liked(id, member.clone()))
}

pub fn set_liked(env: &Env, id: u64, member: &Address, liked: bool) {
    let key = DataKey::Liked(id, member.clone());
    if liked {
        env.storage().persistent().set(&key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

pub fn get_comments(env: &Env, id: u64) -> Vec<Comment> {
    env.storage()
        .persistent()
        .get(&DataKey::Comments(id))
        .unwrap_or(Vec::new(env))
}

pub fn set_comments(env: &Env, id: u64, comments: &Vec<Comment>) {
    env.storage().persistent().set(&DataKey::Comments(id), comments);
}

pub fn get_author_posts(env: &Env, author: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::AuthorPosts(author.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn push_author_post(env: &Env, author: &Address, id: u64) {
    let mut ids = get_author_posts(env, author);
    ids.push_back(id);
    env.storage()
        .persistent()
        .set(&DataKey::AuthorPosts(author.clone()), &ids);
}

/// Posts by `author` on `day`, counting this one. A single persistent entry
/// per author holds `(day, count)` and restarts when the day changes.
pub fn bump_daily_posts(env: &Env, author: &Address, day: u64) -> u32 {
    let key = DataKey::DailyPosts(author.clone());
    let count = match env.storage().persistent().get::<_, (u64, u32)>(&key) {
        Some((last_day, count)) if last_day == day => count + 1,
        _ => 1,
    };
    env.storage().persistent().set(&key, &(day, count));
    count
}

// Reviews

pub fn review_count(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::ReviewCounter).unwrap_or(0)
}

pub fn next_review_id(env: &Env) -> u64 {
    let id = review_count(env) + 1;
    env.storage().instance().set(&DataKey::ReviewCounter, &id);
    id
}

pub fn get_review(env: &Env, id: u64) -> Option<Review> {
    env.storage().persistent().get(&DataKey::Review(id))
}

pub fn set_review(env: &Env, review: &Review) {
    env.storage().persistent().set(&DataKey::Review(review.id), review);
}

pub fn has_marked_helpful(env: &Env, id: u64, member: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Helpful(id, member.clone()))
}

pub fn set_marked_helpful(env: &Env, id: u64, member: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Helpful(id, member.clone()), &true);
}

// Drinks

pub fn get_drinks(env: &Env) -> Vec<Symbol> {
    env.storage()
        .persistent()
        .get(&DataKey::Drinks)
        .unwrap_or(Vec::new(env))
}

pub fn get_drink_stats(env: &Env, drink: &Symbol) -> DrinkStats {
    env.storage()
        .persistent()
        .get(&DataKey::DrinkStats(drink.clone()))
        .unwrap_or_default()
}

/// Count a mention of `drink`, with an optional 1..=5 rating.
pub fn record_mention(env: &Env, drink: &Symbol, rating: Option<u32>) {
    let key = DataKey::DrinkStats(drink.clone());
    let mut stats: DrinkStats = match env.storage().persistent().get(&key) {
        Some(stats) => stats,
        None => {
            let mut drinks = get_drinks(env);
            drinks.push_back(drink.clone());
            env.storage().persistent().set(&DataKey::Drinks, &drinks);
            DrinkStats::default()
        }
    };

    stats.mentions += 1;
    if let Some(rating) = rating {
        stats.rating_sum += rating;
        stats.ratings += 1;
    }
    env.storage().persistent().set(&key, &stats);
}
