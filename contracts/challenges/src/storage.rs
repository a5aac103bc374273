use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::types::{
    Challenge, ChallengeConfig, ChallengeError, ChallengeProgress, DataKey, Streak, WheelPrize,
};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &ChallengeConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<ChallengeConfig, ChallengeError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ChallengeError::NotInitialized)
}

pub fn get_challenge(env: &Env, id: &Symbol) -> Option<Challenge> {
    env.storage().persistent().get(&DataKey::Challenge(id.clone()))
}

pub fn set_challenge(env: &Env, challenge: &Challenge) {
    env.storage()
        .persistent()
        .set(&DataKey::Challenge(challenge.id.clone()), challenge);
}

pub fn get_challenge_ids(env: &Env) -> Vec<Symbol> {
    env.storage()
        .persistent()
        .get(&DataKey::ChallengeIds)
        .unwrap_or(Vec::new(env))
}

pub fn set_challenge_ids(env: &Env, ids: &Vec<Symbol>) {
    env.storage().persistent().set(&DataKey::ChallengeIds, ids);
}

pub fn get_progress(env: &Env, member: &Address, id: &Symbol) -> ChallengeProgress {
    env.storage()
        .persistent()
        .get(&DataKey::Progress(member.clone(), id.clone()))
        .unwrap_or(ChallengeProgress {
            progress: 0,
            completed: false,
            completed_at: 0,
        })
}

pub fn set_progress(env: &Env, member: &Address, id: &Symbol, progress: &ChallengeProgress) {
    env.storage()
        .persistent()
        .set(&DataKey::Progress(member.clone(), id.clone()), progress);
}

pub fn get_streak(env: &Env, member: &Address) -> Streak {
    env.storage()
        .persistent()
        .get(&DataKey::Streak(member.clone()))
        .unwrap_or(Streak {
            current: 0,
            longest: 0,
            last_day: 0,
        })
}

pub fn set_streak(env: &Env, member: &Address, streak: &Streak) {
    env.storage()
        .persistent()
        .set(&DataKey::Streak(member.clone()), streak);
}

pub fn get_wheel_prizes(env: &Env) -> Vec<WheelPrize> {
    env.storage()
        .instance()
        .get(&DataKey::WheelPrizes)
        .unwrap_or(Vec::new(env))
}

pub fn set_wheel_prizes(env: &Env, prizes: &Vec<WheelPrize>) {
    env.storage().instance().set(&DataKey::WheelPrizes, prizes);
}

pub fn get_last_spin(env: &Env, member: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::LastSpin(member.clone()))
}

pub fn set_last_spin(env: &Env, member: &Address, timestamp: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::LastSpin(member.clone()), &timestamp);
}
