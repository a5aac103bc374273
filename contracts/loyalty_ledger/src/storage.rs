use loyalty_core::Promotion;
use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::types::{DataKey, LedgerConfig, LedgerEntry, LedgerError, LedgerStats, Reward};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &LedgerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<LedgerConfig, LedgerError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(LedgerError::NotInitialized)
}

pub fn get_stats(env: &Env) -> LedgerStats {
    env.storage()
        .instance()
        .get(&DataKey::Stats)
        .unwrap_or(LedgerStats {
            members: 0,
            total_issued: 0,
            total_redeemed: 0,
        })
}

pub fn set_stats(env: &Env, stats: &LedgerStats) {
    env.storage().instance().set(&DataKey::Stats, stats);
}

pub fn is_issuer(env: &Env, issuer: &Address) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Issuer(issuer.clone()))
        .unwrap_or(false)
}

pub fn set_issuer(env: &Env, issuer: &Address, allowed: bool) {
    if allowed {
        env.storage().instance().set(&DataKey::Issuer(issuer.clone()), &true);
    } else {
        env.storage().instance().remove(&DataKey::Issuer(issuer.clone()));
    }
}

pub fn has_balance(env: &Env, member: &Address) -> bool {
    env.storage().persistent().has(&DataKey::Balance(member.clone()))
}

pub fn get_balance(env: &Env, member: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(member.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, member: &Address, balance: i128) {
    env.storage().persistent().set(&DataKey::Balance(member.clone()), &balance);
}

pub fn get_members(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Members)
        .unwrap_or(Vec::new(env))
}

pub fn add_member(env: &Env, member: &Address) {
    let mut members = get_members(env);
    members.push_back(member.clone());
    env.storage().persistent().set(&DataKey::Members, &members);
}

pub fn get_history(env: &Env, member: &Address) -> Vec<LedgerEntry> {
    env.storage()
        .persistent()
        .get(&DataKey::History(member.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn push_history(env: &Env, member: &Address, entry: LedgerEntry, limit: u32) {
    let mut history = get_history(env, member);
    history.push_back(entry);
    while history.len() > limit {
        history.remove(0);
    }
    env.storage()
        .persistent()
        .set(&DataKey::History(member.clone()), &history);
}

pub fn get_reward(env: &Env, id: &Symbol) -> Option<Reward> {
    env.storage().persistent().get(&DataKey::Reward(id.clone()))
}

pub fn set_reward(env: &Env, reward: &Reward) {
    env.storage()
        .persistent()
        .set(&DataKey::Reward(reward.id.clone()), reward);
}

pub fn get_reward_ids(env: &Env) -> Vec<Symbol> {
    env.storage()
        .persistent()
        .get(&DataKey::RewardIds)
        .unwrap_or(Vec::new(env))
}

pub fn set_reward_ids(env: &Env, ids: &Vec<Symbol>) {
    env.storage().persistent().set(&DataKey::RewardIds, ids);
}

pub fn has_redeemed(env: &Env, member: &Address, reward_id: &Symbol) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Redeemed(member.clone(), reward_id.clone()))
}

pub fn set_redeemed(env: &Env, member: &Address, reward_id: &Symbol) {
    env.storage()
        .persistent()
        .set(&DataKey::Redeemed(member.clone(), reward_id.clone()), &true);
}

pub fn get_promotion(env: &Env, id: &Symbol) -> Option<Promotion> {
    env.storage().persistent().get(&DataKey::Promotion(id.clone()))
}

pub fn set_promotion(env: &Env, promotion: &Promotion) {
    env.storage()
        .persistent()
        .set(&DataKey::Promotion(promotion.id.clone()), promotion);
}

pub fn remove_promotion(env: &Env, id: &Symbol) {
    env.storage().persistent().remove(&DataKey::Promotion(id.clone()));
}

pub fn get_promotion_ids(env: &Env) -> Vec<Symbol> {
    env.storage()
        .persistent()
        .get(&DataKey::PromotionIds)
        .unwrap_or(Vec::new(env))
}

pub fn set_promotion_ids(env: &Env, ids: &Vec<Symbol>) {
    env.storage().persistent().set(&DataKey::PromotionIds, ids);
}
