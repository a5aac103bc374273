#![no_std]

//! Loyalty ledger: the one place point balances live.
//!
//! Checkout, challenges, referrals and the social feed are authorized as
//! issuers and move balances through `credit`/`debit`. Tiers are never stored;
//! they are recomputed from the balance on every read.

mod storage;
pub mod types;

use loyalty_core::{
    rules, Activity, CartLine, OrderQuote, Promotion, Standing, Tier, TierPerks, TierProgress,
};
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env, Symbol, Vec};

use crate::storage::*;
use crate::types::*;

const EVT_CREDIT: Symbol = symbol_short!("credit");
const EVT_DEBIT: Symbol = symbol_short!("debit");

#[contract]
pub struct LoyaltyLedger;

#[contractimpl]
impl LoyaltyLedger {
    // ───────────── INITIALIZATION ─────────────

    pub fn initialize(
        env: Env,
        admin: Address,
        tax_bps: u32,
        points_per_dollar: u32,
        history_limit: u32,
    ) -> Result<(), LedgerError> {
        if has_config(&env) {
            return Err(LedgerError::AlreadyInitialized);
        }
        admin.require_auth();

        let config = LedgerConfig {
            admin: admin.clone(),
            tax_bps,
            points_per_dollar,
            history_limit,
        };
        Self::validate_config(&config)?;
        set_config(&env, &config);

        env.events().publish(
            (Symbol::new(&env, "init"), Symbol::new(&env, "ledger")),
            (admin, tax_bps, points_per_dollar),
        );
        Ok(())
    }

    pub fn update_config(env: Env, admin: Address, config: LedgerConfig) -> Result<(), LedgerError> {
        Self::require_admin(&env, &admin)?;
        Self::validate_config(&config)?;
        set_config(&env, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<LedgerConfig, LedgerError> {
        get_config(&env)
    }

    // ───────────── ISSUERS ─────────────

    /// Allow a contract (or operator) to credit and debit member balances.
    pub fn authorize_issuer(env: Env, admin: Address, issuer: Address) -> Result<(), LedgerError> {
        Self::require_admin(&env, &admin)?;
        set_issuer(&env, &issuer, true);
        Ok(())
    }

    pub fn revoke_issuer(env: Env, admin: Address, issuer: Address) -> Result<(), LedgerError> {
        Self::require_admin(&env, &admin)?;
        set_issuer(&env, &issuer, false);
        Ok(())
    }

    pub fn is_issuer(env: Env, issuer: Address) -> bool {
        is_issuer(&env, &issuer)
    }

    // ───────────── BALANCES ─────────────

    pub fn credit(
        env: Env,
        issuer: Address,
        member: Address,
        amount: i128,
        activity: Activity,
    ) -> Result<i128, LedgerError> {
        Self::require_issuer(&env, &issuer)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        Self::apply_delta(&env, &member, amount, activity)
    }

    pub fn debit(
        env: Env,
        issuer: Address,
        member: Address,
        amount: i128,
        activity: Activity,
    ) -> Result<i128, LedgerError> {
        Self::require_issuer(&env, &issuer)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        Self::apply_delta(&env, &member, -amount, activity)
    }

    /// Manual credit by the admin, recorded as an adjustment.
    pub fn grant(env: Env, admin: Address, member: Address, amount: i128) -> Result<i128, LedgerError> {
        Self::require_admin(&env, &admin)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        Self::apply_delta(&env, &member, amount, Activity::Adjustment)
    }

    pub fn balance(env: Env, member: Address) -> i128 {
        get_balance(&env, &member)
    }

    pub fn tier(env: Env, member: Address) -> Tier {
        rules::current_tier(get_balance(&env, &member))
    }

    pub fn tier_progress(env: Env, member: Address) -> TierProgress {
        rules::tier_progress(get_balance(&env, &member))
    }

    pub fn perks(_env: Env, tier: Tier) -> TierPerks {
        tier.perks()
    }

    pub fn history(env: Env, member: Address) -> Vec<LedgerEntry> {
        get_history(&env, &member)
    }

    pub fn get_statistics(env: Env) -> LedgerStats {
        get_stats(&env)
    }

    // ───────────── REWARD CATALOG ─────────────

    pub fn add_reward(env: Env, admin: Address, reward: Reward) -> Result<(), LedgerError> {
        Self::require_admin(&env, &admin)?;
        if reward.points_cost <= 0 {
            return Err(LedgerError::InvalidReward);
        }

        let mut ids = get_reward_ids(&env);
        if !ids.contains(&reward.id) {
            ids.push_back(reward.id.clone());
            set_reward_ids(&env, &ids);
        }
        set_reward(&env, &reward);
        Ok(())
    }

    pub fn set_reward_available(
        env: Env,
        admin: Address,
        reward_id: Symbol,
        available: bool,
    ) -> Result<(), LedgerError> {
        Self::require_admin(&env, &admin)?;
        let mut reward = get_reward(&env, &reward_id).ok_or(LedgerError::RewardNotFound)?;
        reward.available = available;
        set_reward(&env, &reward);
        Ok(())
    }

    pub fn get_reward(env: Env, reward_id: Symbol) -> Option<Reward> {
        get_reward(&env, &reward_id)
    }

    pub fn list_rewards(env: Env) -> Vec<Reward> {
        let mut rewards = Vec::new(&env);
        for id in get_reward_ids(&env).iter() {
            if let Some(reward) = get_reward(&env, &id) {
                rewards.push_back(reward);
            }
        }
        rewards
    }

    /// Spend points on a catalog reward. Each member can redeem a reward once.
    pub fn redeem_reward(env: Env, member: Address, reward_id: Symbol) -> Result<i128, LedgerError> {
        member.require_auth();
        let config = get_config(&env)?;

        let reward = get_reward(&env, &reward_id).ok_or(LedgerError::RewardNotFound)?;
        if !reward.available {
            return Err(LedgerError::RewardUnavailable);
        }
        if has_redeemed(&env, &member, &reward_id) {
            return Err(LedgerError::RewardAlreadyRedeemed);
        }

        let balance = Self::apply_delta_with(&env, &config, &member, -reward.points_cost, Activity::Reward)?;
        set_redeemed(&env, &member, &reward_id);

        env.events().publish(
            (Symbol::new(&env, "reward_redeemed"), member),
            (reward_id, reward.points_cost),
        );
        Ok(balance)
    }

    pub fn has_redeemed(env: Env, member: Address, reward_id: Symbol) -> bool {
        has_redeemed(&env, &member, &reward_id)
    }

    // ───────────── PROMOTIONS ─────────────

    pub fn add_promotion(env: Env, admin: Address, promotion: Promotion) -> Result<(), LedgerError> {
        Self::require_admin(&env, &admin)?;
        if promotion.bonus_bps == 0 || promotion.starts_at >= promotion.ends_at {
            return Err(LedgerError::InvalidPromotion);
        }
        if get_promotion(&env, &promotion.id).is_some() {
            return Err(LedgerError::PromotionExists);
        }

        let mut ids = get_promotion_ids(&env);
        ids.push_back(promotion.id.clone());
        set_promotion_ids(&env, &ids);
        set_promotion(&env, &promotion);

        env.events().publish(
            (Symbol::new(&env, "promo_added"), promotion.id.clone()),
            (promotion.item_id, promotion.bonus_bps, promotion.starts_at, promotion.ends_at),
        );
        Ok(())
    }

    pub fn end_promotion(env: Env, admin: Address, promotion_id: Symbol) -> Result<(), LedgerError> {
        Self::require_admin(&env, &admin)?;
        if get_promotion(&env, &promotion_id).is_none() {
            return Err(LedgerError::PromotionNotFound);
        }

        let mut ids = get_promotion_ids(&env);
        if let Some(index) = ids.first_index_of(&promotion_id) {
            ids.remove(index);
        }
        set_promotion_ids(&env, &ids);
        remove_promotion(&env, &promotion_id);

        env.events()
            .publish((Symbol::new(&env, "promo_ended"), promotion_id), ());
        Ok(())
    }

    pub fn active_promotions(env: Env) -> Vec<Promotion> {
        let now = env.ledger().timestamp();
        let mut active = Vec::new(&env);
        for id in get_promotion_ids(&env).iter() {
            if let Some(promo) = get_promotion(&env, &id) {
                if promo.is_active(now) {
                    active.push_back(promo);
                }
            }
        }
        active
    }

    // ───────────── PRICING ─────────────

    /// Fill in `unit_points` for each line from the base rate and whatever
    /// promotions are running right now, with no tier bonus. Incoming
    /// `unit_points` are ignored.
    pub fn price_cart(env: Env, lines: Vec<CartLine>) -> Result<Vec<CartLine>, LedgerError> {
        let config = get_config(&env)?;
        Ok(Self::priced(&env, &config, &lines, 0))
    }

    /// Like `price_cart`, with the earn bonus of the member's current tier.
    pub fn price_cart_for(env: Env, member: Address, lines: Vec<CartLine>) -> Result<Vec<CartLine>, LedgerError> {
        let config = get_config(&env)?;
        let bonus = rules::current_tier(get_balance(&env, &member)).earn_bonus_bps();
        Ok(Self::priced(&env, &config, &lines, bonus))
    }

    pub fn quote(
        env: Env,
        member: Address,
        lines: Vec<CartLine>,
        points_to_redeem: i128,
    ) -> Result<OrderQuote, LedgerError> {
        let config = get_config(&env)?;
        let balance = get_balance(&env, &member);
        let bonus = rules::current_tier(balance).earn_bonus_bps();
        let priced = Self::priced(&env, &config, &lines, bonus);
        Ok(rules::quote(&priced, balance, points_to_redeem, config.tax_bps))
    }

    // ───────────── STANDINGS ─────────────

    /// Members ordered by balance, highest first. Equal balances keep join order.
    pub fn leaderboard(env: Env, limit: u32) -> Vec<Standing> {
        let mut ranked: Vec<(Address, i128)> = Vec::new(&env);
        for member in get_members(&env).iter() {
            let points = get_balance(&env, &member);
            let mut at = ranked.len();
            for (i, (_, other)) in ranked.iter().enumerate() {
                if other < points {
                    at = i as u32;
                    break;
                }
            }
            ranked.insert(at, (member, points));
        }

        let mut standings = Vec::new(&env);
        for (i, (member, points)) in ranked.iter().take(limit as usize).enumerate() {
            standings.push_back(Standing {
                rank: i as u32 + 1,
                member,
                points,
            });
        }
        standings
    }

    // ───────────── HELPERS ─────────────

    fn validate_config(config: &LedgerConfig) -> Result<(), LedgerError> {
        if config.tax_bps as i128 > rules::BPS_DENOMINATOR
            || config.points_per_dollar == 0
            || config.history_limit == 0
        {
            return Err(LedgerError::InvalidConfig);
        }
        Ok(())
    }

    fn require_admin(env: &Env, admin: &Address) -> Result<LedgerConfig, LedgerError> {
        admin.require_auth();
        let config = get_config(env)?;
        if config.admin != *admin {
            return Err(LedgerError::Unauthorized);
        }
        Ok(config)
    }

    fn require_issuer(env: &Env, issuer: &Address) -> Result<(), LedgerError> {
        issuer.require_auth();
        if !has_config(env) {
            return Err(LedgerError::NotInitialized);
        }
        if !is_issuer(env, issuer) {
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }

    fn priced(env: &Env, config: &LedgerConfig, lines: &Vec<CartLine>, tier_bonus_bps: u32) -> Vec<CartLine> {
        let now = env.ledger().timestamp();
        let promotions = Self::active_promotions(env.clone());

        let mut priced = Vec::new(env);
        for mut line in lines.iter() {
            let base = rules::base_points(line.unit_price, config.points_per_dollar);
            line.unit_points = rules::promoted_points(base, tier_bonus_bps, &line.item_id, &promotions, now);
            priced.push_back(line);
        }
        priced
    }

    fn apply_delta(env: &Env, member: &Address, delta: i128, activity: Activity) -> Result<i128, LedgerError> {
        let config = get_config(env)?;
        Self::apply_delta_with(env, &config, member, delta, activity)
    }

    fn apply_delta_with(
        env: &Env,
        config: &LedgerConfig,
        member: &Address,
        delta: i128,
        activity: Activity,
    ) -> Result<i128, LedgerError> {
        let is_new = !has_balance(env, member);
        let balance = get_balance(env, member);
        let new_balance = balance + delta;
        if new_balance < 0 {
            log!(env, "debit exceeds balance", member.clone(), balance, delta);
            return Err(LedgerError::InsufficientPoints);
        }

        set_balance(env, member, new_balance);

        let mut stats = get_stats(env);
        if is_new {
            add_member(env, member);
            stats.members += 1;
        }
        if delta > 0 {
            stats.total_issued += delta;
        } else {
            stats.total_redeemed += -delta;
        }
        set_stats(env, &stats);

        let timestamp = env.ledger().timestamp();
        push_history(
            env,
            member,
            LedgerEntry {
                activity,
                delta,
                balance: new_balance,
                timestamp,
            },
            config.history_limit,
        );

        let topic = if delta > 0 { EVT_CREDIT } else { EVT_DEBIT };
        env.events()
            .publish((topic, member.clone()), (activity, delta, new_balance));

        let old_tier = rules::current_tier(balance);
        let new_tier = rules::current_tier(new_balance);
        if old_tier != new_tier {
            env.events().publish(
                (Symbol::new(env, "tier_changed"), member.clone()),
                (old_tier, new_tier),
            );
        }

        Ok(new_balance)
    }
}

#[cfg(test)]
mod test;
