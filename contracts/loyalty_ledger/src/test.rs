#![cfg(test)]

use super::*;
use soroban_sdk::{
    testutils::{Address as _, Events, Ledger},
    Address, Env, String, Symbol, TryFromVal, Vec,
};

fn setup(env: &Env) -> (LoyaltyLedgerClient<'_>, Address, Address) {
    env.mock_all_auths();
    let admin = Address::generate(env);
    let issuer = Address::generate(env);

    let id = env.register_contract(None, LoyaltyLedger);
    let client = LoyaltyLedgerClient::new(env, &id);
    client.initialize(&admin, &800, &10, &5);
    client.authorize_issuer(&admin, &issuer);

    (client, admin, issuer)
}

fn reward(env: &Env, id: &str, cost: i128, available: bool) -> Reward {
    Reward {
        id: Symbol::new(env, id),
        name: String::from_str(env, id),
        description: String::from_str(env, "test reward"),
        points_cost: cost,
        kind: RewardKind::Drink,
        available,
    }
}

/// Recorded `tier_changed` events as (member, from, to).
fn tier_changes(env: &Env) -> Vec<(Address, Tier, Tier)> {
    let topic = Symbol::new(env, "tier_changed");
    let mut changes = Vec::new(env);
    for (_, topics, data) in env.events().all().iter() {
        let is_tier_change =
            matches!(Symbol::try_from_val(env, &topics.get_unchecked(0)), Ok(name) if name == topic);
        if is_tier_change {
            let member = Address::try_from_val(env, &topics.get_unchecked(1)).unwrap();
            let (from, to) = <(Tier, Tier)>::try_from_val(env, &data).unwrap();
            changes.push_back((member, from, to));
        }
    }
    changes
}

fn line(env: &Env, id: &str, unit_price: i128, quantity: u32) -> CartLine {
    CartLine {
        item_id: Symbol::new(env, id),
        unit_price,
        unit_points: 0,
        quantity,
    }
}

#[test]
fn test_initialize() {
    let env = Env::default();
    let (client, admin, _) = setup(&env);

    let config = client.get_config();
    assert_eq!(config.admin, admin);
    assert_eq!(config.tax_bps, 800);
    assert_eq!(config.points_per_dollar, 10);

    let err = client.try_initialize(&admin, &800, &10, &5);
    assert_eq!(err, Err(Ok(LedgerError::AlreadyInitialized)));
}

#[test]
fn test_initialize_rejects_bad_config() {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let id = env.register_contract(None, LoyaltyLedger);
    let client = LoyaltyLedgerClient::new(&env, &id);

    assert_eq!(
        client.try_initialize(&admin, &10_001, &10, &5),
        Err(Ok(LedgerError::InvalidConfig))
    );
    assert_eq!(
        client.try_initialize(&admin, &800, &0, &5),
        Err(Ok(LedgerError::InvalidConfig))
    );
}

#[test]
fn test_credit_and_debit() {
    let env = Env::default();
    let (client, _, issuer) = setup(&env);
    let member = Address::generate(&env);

    assert_eq!(client.balance(&member), 0);
    assert_eq!(client.credit(&issuer, &member, &750, &Activity::Order), 750);
    assert_eq!(client.debit(&issuer, &member, &200, &Activity::Redemption), 550);
    assert_eq!(client.balance(&member), 550);

    let stats = client.get_statistics();
    assert_eq!(stats.members, 1);
    assert_eq!(stats.total_issued, 750);
    assert_eq!(stats.total_redeemed, 200);
}

#[test]
fn test_balance_never_negative() {
    let env = Env::default();
    let (client, _, issuer) = setup(&env);
    let member = Address::generate(&env);

    client.credit(&issuer, &member, &100, &Activity::Order);
    let err = client.try_debit(&issuer, &member, &101, &Activity::Redemption);
    assert_eq!(err, Err(Ok(LedgerError::InsufficientPoints)));
    assert_eq!(client.balance(&member), 100);
}

#[test]
fn test_rejects_non_positive_amounts() {
    let env = Env::default();
    let (client, _, issuer) = setup(&env);
    let member = Address::generate(&env);

    assert_eq!(
        client.try_credit(&issuer, &member, &0, &Activity::Order),
        Err(Ok(LedgerError::InvalidAmount))
    );
    assert_eq!(
        client.try_debit(&issuer, &member, &-5, &Activity::Order),
        Err(Ok(LedgerError::InvalidAmount))
    );
}

#[test]
fn test_only_issuers_move_balances() {
    let env = Env::default();
    let (client, admin, issuer) = setup(&env);
    let stranger = Address::generate(&env);
    let member = Address::generate(&env);

    assert_eq!(
        client.try_credit(&stranger, &member, &10, &Activity::Order),
        Err(Ok(LedgerError::Unauthorized))
    );

    client.revoke_issuer(&admin, &issuer);
    assert!(!client.is_issuer(&issuer));
    assert_eq!(
        client.try_credit(&issuer, &member, &10, &Activity::Order),
        Err(Ok(LedgerError::Unauthorized))
    );
}

#[test]
fn test_admin_only() {
    let env = Env::default();
    let (client, _, _) = setup(&env);
    let stranger = Address::generate(&env);
    let member = Address::generate(&env);

    assert_eq!(
        client.try_grant(&stranger, &member, &10),
        Err(Ok(LedgerError::Unauthorized))
    );
    assert_eq!(
        client.try_authorize_issuer(&stranger, &stranger),
        Err(Ok(LedgerError::Unauthorized))
    );
}

#[test]
fn test_tier_follows_balance() {
    let env = Env::default();
    let (client, admin, issuer) = setup(&env);
    let member = Address::generate(&env);

    assert_eq!(client.tier(&member), Tier::Bronze);
    client.grant(&admin, &member, &750);
    assert_eq!(client.tier(&member), Tier::Silver);

    let progress = client.tier_progress(&member);
    assert_eq!(progress.next, Some(Tier::Gold));
    assert_eq!(progress.percent_complete, 25);
    assert_eq!(progress.points_needed, 750);

    client.credit(&issuer, &member, &750, &Activity::Challenge);
    assert_eq!(client.tier(&member), Tier::Gold);
    assert_eq!(client.tier_progress(&member).percent_complete, 100);

    client.debit(&issuer, &member, &1_100, &Activity::Redemption);
    assert_eq!(client.tier(&member), Tier::Bronze);
}

#[test]
fn test_tier_changed_event() {
    let env = Env::default();
    let (client, admin, issuer) = setup(&env);
    let member = Address::generate(&env);

    client.grant(&admin, &member, &450);
    assert!(tier_changes(&env).is_empty());
    client.credit(&issuer, &member, &40, &Activity::Order);
    assert!(tier_changes(&env).is_empty());

    client.credit(&issuer, &member, &10, &Activity::Order);
    assert_eq!(
        tier_changes(&env).last(),
        Some((member.clone(), Tier::Bronze, Tier::Silver))
    );

    client.debit(&issuer, &member, &1, &Activity::Redemption);
    assert_eq!(
        tier_changes(&env).last(),
        Some((member.clone(), Tier::Silver, Tier::Bronze))
    );
}

#[test]
fn test_tier_perks_raise_earn_rate() {
    let env = Env::default();
    let (client, admin, _) = setup(&env);
    let bronze = Address::generate(&env);
    let silver = Address::generate(&env);
    let gold = Address::generate(&env);
    client.grant(&admin, &silver, &500);
    client.grant(&admin, &gold, &1_500);

    assert_eq!(client.perks(&Tier::Bronze).earn_bonus_bps, 0);
    assert_eq!(client.perks(&Tier::Silver).earn_bonus_bps, 2_500);
    let perks = client.perks(&Tier::Gold);
    assert_eq!(perks.earn_bonus_bps, 5_000);
    assert_eq!(perks.min_points, 1_500);

    let cart = Vec::from_array(&env, [line(&env, "mocha", 500, 1)]);
    assert_eq!(client.price_cart_for(&bronze, &cart).get(0).unwrap().unit_points, 50);
    assert_eq!(client.price_cart_for(&silver, &cart).get(0).unwrap().unit_points, 62);
    assert_eq!(client.price_cart_for(&gold, &cart).get(0).unwrap().unit_points, 75);
    // list pricing ignores tiers
    assert_eq!(client.price_cart(&cart).get(0).unwrap().unit_points, 50);
    assert_eq!(client.quote(&gold, &cart, &0).points_earned, 75);

    env.ledger().set_timestamp(10);
    client.add_promotion(
        &admin,
        &Promotion {
            id: Symbol::new(&env, "weekend"),
            item_id: None,
            bonus_bps: 5_000,
            starts_at: 0,
            ends_at: 100,
        },
    );
    assert_eq!(client.price_cart_for(&gold, &cart).get(0).unwrap().unit_points, 100);
}

#[test]
fn test_history_bounded() {
    let env = Env::default();
    let (client, _, issuer) = setup(&env);
    let member = Address::generate(&env);

    env.ledger().set_timestamp(0);
    for _ in 0..7 {
        client.credit(&issuer, &member, &10, &Activity::Post);
        env.ledger().with_mut(|li| li.timestamp += 60);
    }

    let history = client.history(&member);
    assert_eq!(history.len(), 5);
    let last = history.get(4).unwrap();
    assert_eq!(last.balance, 70);
    assert_eq!(last.activity, Activity::Post);
    assert_eq!(history.get(0).unwrap().balance, 30);
}

#[test]
fn test_redeem_reward_once() {
    let env = Env::default();
    let (client, admin, _) = setup(&env);
    let member = Address::generate(&env);

    client.add_reward(&admin, &reward(&env, "free_latte", 150, true));
    client.grant(&admin, &member, &750);

    let latte = Symbol::new(&env, "free_latte");
    assert_eq!(client.redeem_reward(&member, &latte), 600);
    assert!(client.has_redeemed(&member, &latte));
    assert_eq!(
        client.try_redeem_reward(&member, &latte),
        Err(Ok(LedgerError::RewardAlreadyRedeemed))
    );
    assert_eq!(client.balance(&member), 600);
}

#[test]
fn test_redeem_reward_checks() {
    let env = Env::default();
    let (client, admin, _) = setup(&env);
    let member = Address::generate(&env);

    client.add_reward(&admin, &reward(&env, "free_drink", 200, false));
    client.add_reward(&admin, &reward(&env, "mug", 300, true));
    client.grant(&admin, &member, &250);

    assert_eq!(
        client.try_redeem_reward(&member, &Symbol::new(&env, "free_drink")),
        Err(Ok(LedgerError::RewardUnavailable))
    );
    assert_eq!(
        client.try_redeem_reward(&member, &Symbol::new(&env, "mug")),
        Err(Ok(LedgerError::InsufficientPoints))
    );
    assert_eq!(
        client.try_redeem_reward(&member, &Symbol::new(&env, "tote")),
        Err(Ok(LedgerError::RewardNotFound))
    );

    client.set_reward_available(&admin, &Symbol::new(&env, "free_drink"), &true);
    assert_eq!(client.redeem_reward(&member, &Symbol::new(&env, "free_drink")), 50);
    assert_eq!(client.list_rewards().len(), 2);
}

#[test]
fn test_price_cart_with_promotions() {
    let env = Env::default();
    let (client, admin, _) = setup(&env);
    env.ledger().set_timestamp(1_000);

    let cart = Vec::from_array(
        &env,
        [line(&env, "latte", 450, 2), line(&env, "iced_latte", 475, 1)],
    );

    let priced = client.price_cart(&cart);
    assert_eq!(priced.get(0).unwrap().unit_points, 45);
    assert_eq!(priced.get(1).unwrap().unit_points, 48);

    client.add_promotion(
        &admin,
        &Promotion {
            id: Symbol::new(&env, "double_iced"),
            item_id: Some(Symbol::new(&env, "iced_latte")),
            bonus_bps: 10_000,
            starts_at: 0,
            ends_at: 2_000,
        },
    );
    let priced = client.price_cart(&cart);
    assert_eq!(priced.get(0).unwrap().unit_points, 45);
    assert_eq!(priced.get(1).unwrap().unit_points, 96);
    assert_eq!(client.active_promotions().len(), 1);

    env.ledger().set_timestamp(2_000);
    assert_eq!(client.active_promotions().len(), 0);
    assert_eq!(client.price_cart(&cart).get(1).unwrap().unit_points, 48);
}

#[test]
fn test_promotion_validation_and_end() {
    let env = Env::default();
    let (client, admin, _) = setup(&env);
    let promo = Promotion {
        id: Symbol::new(&env, "weekend"),
        item_id: None,
        bonus_bps: 5_000,
        starts_at: 0,
        ends_at: 100,
    };

    let mut bad = promo.clone();
    bad.starts_at = 100;
    assert_eq!(
        client.try_add_promotion(&admin, &bad),
        Err(Ok(LedgerError::InvalidPromotion))
    );

    client.add_promotion(&admin, &promo);
    assert_eq!(
        client.try_add_promotion(&admin, &promo),
        Err(Ok(LedgerError::PromotionExists))
    );

    client.end_promotion(&admin, &promo.id);
    assert_eq!(client.active_promotions().len(), 0);
    assert_eq!(
        client.try_end_promotion(&admin, &promo.id),
        Err(Ok(LedgerError::PromotionNotFound))
    );
}

#[test]
fn test_quote() {
    let env = Env::default();
    let (client, admin, _) = setup(&env);
    let member = Address::generate(&env);
    client.grant(&admin, &member, &750);

    let cart = Vec::from_array(&env, [line(&env, "pastry", 1200, 1)]);
    let quote = client.quote(&member, &cart, &750);
    assert_eq!(quote.subtotal, 1200);
    assert_eq!(quote.tax, 96);
    assert_eq!(quote.max_redeemable, 750);
    assert_eq!(quote.points_redeemed, 750);
    assert_eq!(quote.discount, 750);
    assert_eq!(quote.total, 546);
    // 120 base at the silver rate
    assert_eq!(quote.points_earned, 150);

    let capped = client.quote(&member, &cart, &5_000);
    assert_eq!(capped.points_redeemed, 750);
}

#[test]
fn test_leaderboard() {
    let env = Env::default();
    let (client, admin, _) = setup(&env);
    let sarah = Address::generate(&env);
    let mike = Address::generate(&env);
    let you = Address::generate(&env);
    let emma = Address::generate(&env);

    client.grant(&admin, &sarah, &2847);
    client.grant(&admin, &you, &1987);
    client.grant(&admin, &mike, &2634);
    client.grant(&admin, &emma, &1987);

    let board = client.leaderboard(&3);
    assert_eq!(board.len(), 3);
    assert_eq!(board.get(0).unwrap().member, sarah);
    assert_eq!(board.get(0).unwrap().rank, 1);
    assert_eq!(board.get(1).unwrap().member, mike);
    // equal balances keep join order
    assert_eq!(board.get(2).unwrap().member, you);
    assert_eq!(board.get(2).unwrap().points, 1987);

    assert_eq!(client.leaderboard(&10).len(), 4);
}
