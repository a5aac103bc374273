#![cfg(test)]

use super::*;
use loyalty_ledger::{LoyaltyLedger, LoyaltyLedgerClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    vec, Address, Env, String, Symbol,
};

fn setup(env: &Env) -> (SocialClient<'_>, LoyaltyLedgerClient<'_>, Address) {
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);
    let admin = Address::generate(env);

    let ledger_id = env.register_contract(None, LoyaltyLedger);
    let ledger = LoyaltyLedgerClient::new(env, &ledger_id);
    ledger.initialize(&admin, &800, &10, &20);

    let social_id = env.register_contract(None, Social);
    let social = SocialClient::new(env, &social_id);
    social.initialize(&admin, &ledger_id, &15, &3);
    ledger.authorize_issuer(&admin, &social_id);

    (social, ledger, admin)
}

fn post(env: &Env, social: &SocialClient, author: &Address, text: &str, drink: Option<&str>) -> u64 {
    social.create_post(
        author,
        &String::from_str(env, text),
        &drink.map(|d| Symbol::new(env, d)),
        &vec![env, Symbol::new(env, "coffeetime")],
    )
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let (social, ledger, admin) = setup(&env);
    assert_eq!(
        social.try_initialize(&admin, &ledger.address, &15, &3),
        Err(Ok(SocialError::AlreadyInitialized))
    );
}

#[test]
fn test_post_reward_capped_per_day() {
    let env = Env::default();
    let (social, ledger, _) = setup(&env);
    let author = Address::generate(&env);

    for _ in 0..4 {
        post(&env, &social, &author, "morning brew", None);
    }
    assert_eq!(ledger.balance(&author), 45);
    assert_eq!(social.get_post(&4).unwrap().points_earned, 0);
    assert_eq!(social.get_post(&3).unwrap().points_earned, 15);

    // a new day resets the cap
    env.ledger().set_timestamp(1_000 + 86_400);
    post(&env, &social, &author, "again", None);
    assert_eq!(ledger.balance(&author), 60);
}

#[test]
fn test_post_cap_survives_ledger_progress() {
    let env = Env::default();
    let (social, ledger, _) = setup(&env);
    let author = Address::generate(&env);

    for _ in 0..3 {
        post(&env, &social, &author, "morning brew", None);
    }
    // many ledgers later, still the same day
    env.ledger().with_mut(|li| {
        li.sequence_number += 120;
        li.timestamp += 600;
    });
    let id = post(&env, &social, &author, "afternoon brew", None);

    assert_eq!(social.get_post(&id).unwrap().points_earned, 0);
    assert_eq!(ledger.balance(&author), 45);
}

#[test]
fn test_empty_post_rejected() {
    let env = Env::default();
    let (social, _, _) = setup(&env);
    let author = Address::generate(&env);
    assert_eq!(
        social.try_create_post(&author, &String::from_str(&env, ""), &None, &vec![&env]),
        Err(Ok(SocialError::EmptyText))
    );
}

#[test]
fn test_like_toggles() {
    let env = Env::default();
    let (social, _, _) = setup(&env);
    let author = Address::generate(&env);
    let fan = Address::generate(&env);
    let id = post(&env, &social, &author, "flat white art", Some("flat_white"));

    assert!(social.like_post(&fan, &id));
    assert!(social.like_post(&author, &id));
    assert_eq!(social.get_post(&id).unwrap().likes, 2);
    assert!(!social.like_post(&fan, &id));
    assert_eq!(social.get_post(&id).unwrap().likes, 1);

    assert_eq!(social.try_like_post(&fan, &99), Err(Ok(SocialError::PostNotFound)));
}

#[test]
fn test_comments_and_shares() {
    let env = Env::default();
    let (social, _, _) = setup(&env);
    let author = Address::generate(&env);
    let friend = Address::generate(&env);
    let id = post(&env, &social, &author, "new seasonal menu", None);

    social.comment_post(&friend, &id, &String::from_str(&env, "looks great"));
    assert_eq!(social.comment_post(&author, &id, &String::from_str(&env, "thanks")), 2);

    let comments = social.comments(&id);
    assert_eq!(comments.len(), 2);
    assert_eq!(comments.get(0).unwrap().author, friend);

    assert_eq!(social.share_post(&friend, &id), 1);
    assert_eq!(social.share_post(&friend, &id), 2);
    assert_eq!(social.get_post(&id).unwrap().comments, 2);
}

#[test]
fn test_feed_newest_first() {
    let env = Env::default();
    let (social, _, _) = setup(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    post(&env, &social, &alice, "one", None);
    post(&env, &social, &bob, "two", None);
    post(&env, &social, &alice, "three", None);

    let feed = social.feed(&2);
    assert_eq!(feed.len(), 2);
    assert_eq!(feed.get(0).unwrap().id, 3);
    assert_eq!(feed.get(1).unwrap().author, bob);

    let mine = social.posts_by(&alice);
    assert_eq!(mine.len(), 2);
    assert_eq!(mine.get(0).unwrap().text, String::from_str(&env, "three"));
}

#[test]
fn test_reviews() {
    let env = Env::default();
    let (social, _, _) = setup(&env);
    let critic = Address::generate(&env);
    let reader = Address::generate(&env);
    let mocha = Symbol::new(&env, "mocha");

    assert_eq!(
        social.try_add_review(&critic, &mocha, &6, &String::from_str(&env, "wow")),
        Err(Ok(SocialError::InvalidRating))
    );
    assert_eq!(
        social.try_add_review(&critic, &mocha, &0, &String::from_str(&env, "meh")),
        Err(Ok(SocialError::InvalidRating))
    );

    let id = social.add_review(&critic, &mocha, &4, &String::from_str(&env, "rich"));
    assert_eq!(social.mark_helpful(&reader, &id), 1);
    assert_eq!(
        social.try_mark_helpful(&reader, &id),
        Err(Ok(SocialError::AlreadyMarkedHelpful))
    );
    assert_eq!(social.try_mark_helpful(&critic, &id), Err(Ok(SocialError::OwnReview)));
    assert_eq!(social.try_mark_helpful(&reader, &7), Err(Ok(SocialError::ReviewNotFound)));

    social.add_review(&reader, &mocha, &5, &String::from_str(&env, ""));
    let reviews = social.reviews(&10);
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews.get(0).unwrap().author, reader);
    assert_eq!(reviews.get(1).unwrap().helpful, 1);
}

#[test]
fn test_trending_by_mentions() {
    let env = Env::default();
    let (social, _, _) = setup(&env);
    let member = Address::generate(&env);
    let latte = Symbol::new(&env, "latte");
    let cold_brew = Symbol::new(&env, "cold_brew");

    post(&env, &social, &member, "latte time", Some("latte"));
    post(&env, &social, &member, "cold brew", Some("cold_brew"));
    post(&env, &social, &member, "no drink", None);
    social.add_review(&member, &cold_brew, &5, &String::from_str(&env, "smooth"));
    social.add_review(&member, &cold_brew, &4, &String::from_str(&env, "strong"));
    social.add_review(&member, &Symbol::new(&env, "chai"), &3, &String::from_str(&env, "ok"));

    let trending = social.trending(&2);
    assert_eq!(trending.len(), 2);
    let top = trending.get(0).unwrap();
    assert_eq!(top.drink, cold_brew);
    assert_eq!(top.mentions, 3);
    assert_eq!(top.avg_rating_x100, 450);
    // tied with chai, mentioned first
    let second = trending.get(1).unwrap();
    assert_eq!(second.drink, latte);
    assert_eq!(second.avg_rating_x100, 0);
}
