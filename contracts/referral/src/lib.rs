#![no_std]

use loyalty_core::{Activity, LedgerClient};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, Env, String, Symbol, Vec,
};

//
// ──────────────────────────────────────────────────────────
// ERRORS
// ──────────────────────────────────────────────────────────
//

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ReferralError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidConfig = 4,
    CodeAlreadyExists = 5,
    CodeTaken = 6,
    InvalidCodeLength = 7,
    InvalidCode = 8,
    AlreadyReferred = 9,
    SelfReferral = 10,
    ReferralLimitReached = 11,
    MutualReferral = 12,
}

//
// ──────────────────────────────────────────────────────────
// DATA KEYS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
pub enum DataKey {
    /// Member -> their referral code
    ReferralCode(Address),
    /// Code -> owner (reverse lookup)
    CodeOwner(String),
    /// Referee -> referrer
    Referral(Address),
    /// Referrer -> referees, in registration order
    ReferralsList(Address),
    ReferralStats,
    Config,
    CodeCounter,
}

//
// ──────────────────────────────────────────────────────────
// STRUCTS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReferralStats {
    pub total_codes: u32,
    pub total_referrals: u32,
    pub total_referrer_rewards: i128,
    pub total_referee_rewards: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferralConfig {
    pub admin: Address,
    pub ledger: Address,
    pub referrer_reward: i128,
    pub referee_reward: i128,
    pub max_referrals_per_user: u32,
    pub min_referral_code_length: u32,
}

pub const DEFAULT_REFERRAL_REWARD: i128 = 100;
pub const DEFAULT_MIN_CODE_LENGTH: u32 = 6;
const GENERATED_CODE_LENGTH: usize = 12;
const MAX_CODE_LENGTH: u32 = 32;

//
// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────
//

#[contract]
pub struct ReferralContract;

#[contractimpl]
impl ReferralContract {
    // ───────────── INITIALIZATION ─────────────

    /// Both rewards start at [`DEFAULT_REFERRAL_REWARD`] and custom codes need
    /// at least [`DEFAULT_MIN_CODE_LENGTH`] characters; `update_config` changes either.
    pub fn initialize(
        env: Env,
        admin: Address,
        ledger: Address,
        max_referrals_per_user: u32,
    ) -> Result<(), ReferralError> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(ReferralError::AlreadyInitialized);
        }
        admin.require_auth();
        if max_referrals_per_user == 0 {
            return Err(ReferralError::InvalidConfig);
        }

        let config = ReferralConfig {
            admin: admin.clone(),
            ledger: ledger.clone(),
            referrer_reward: DEFAULT_REFERRAL_REWARD,
            referee_reward: DEFAULT_REFERRAL_REWARD,
            max_referrals_per_user,
            min_referral_code_length: DEFAULT_MIN_CODE_LENGTH,
        };
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::CodeCounter, &0u32);
        env.storage()
            .instance()
            .set(&DataKey::ReferralStats, &ReferralStats::default());

        env.events().publish(
            (Symbol::new(&env, "init"), Symbol::new(&env, "referral")),
            (admin, ledger, max_referrals_per_user),
        );
        Ok(())
    }

    // ───────────── REFERRAL CODES ─────────────

    /// Generate a 12-character code for a member who has none yet.
    pub fn generate_referral_code(env: Env, member: Address) -> Result<String, ReferralError> {
        member.require_auth();
        Self::config(&env)?;
        if env.storage().persistent().has(&DataKey::ReferralCode(member.clone())) {
            return Err(ReferralError::CodeAlreadyExists);
        }

        let mut counter: u32 = env
            .storage()
            .instance()
            .get(&DataKey::CodeCounter)
            .unwrap_or(0);

        // A collision with an earlier custom code moves the counter on.
        let timestamp = env.ledger().timestamp();
        let code = loop {
            let candidate = Self::encode_code(&env, counter, timestamp);
            counter += 1;
            if !env.storage().persistent().has(&DataKey::CodeOwner(candidate.clone())) {
                break candidate;
            }
        };
        env.storage().instance().set(&DataKey::CodeCounter, &counter);

        Self::assign_code(&env, &member, &code);
        Ok(code)
    }

    /// Claim a vanity code such as `BREW2024`.
    pub fn set_custom_code(env: Env, member: Address, code: String) -> Result<(), ReferralError> {
        member.require_auth();
        let config = Self::config(&env)?;

        if code.len() < config.min_referral_code_length || code.len() > MAX_CODE_LENGTH {
            return Err(ReferralError::InvalidCodeLength);
        }
        if env.storage().persistent().has(&DataKey::ReferralCode(member.clone())) {
            return Err(ReferralError::CodeAlreadyExists);
        }
        if env.storage().persistent().has(&DataKey::CodeOwner(code.clone())) {
            return Err(ReferralError::CodeTaken);
        }

        Self::assign_code(&env, &member, &code);
        Ok(())
    }

    pub fn get_referral_code(env: Env, member: Address) -> Option<String> {
        env.storage().persistent().get(&DataKey::ReferralCode(member))
    }

    pub fn get_code_owner(env: Env, code: String) -> Option<Address> {
        env.storage().persistent().get(&DataKey::CodeOwner(code))
    }

    // ───────────── REGISTRATION ─────────────

    /// Register `referee` under the owner of `referral_code` and reward both
    /// through the ledger. A member can be referred only once.
    pub fn register_with_referral_code(
        env: Env,
        referee: Address,
        referral_code: String,
    ) -> Result<Address, ReferralError> {
        referee.require_auth();
        let config = Self::config(&env)?;

        if env.storage().persistent().has(&DataKey::Referral(referee.clone())) {
            return Err(ReferralError::AlreadyReferred);
        }

        let referrer: Address = env
            .storage()
            .persistent()
            .get(&DataKey::CodeOwner(referral_code.clone()))
            .ok_or(ReferralError::InvalidCode)?;
        if referrer == referee {
            return Err(ReferralError::SelfReferral);
        }
        // two members may not refer each other
        if Self::get_referrer(env.clone(), referrer.clone()) == Some(referee.clone()) {
            return Err(ReferralError::MutualReferral);
        }

        let mut referees = Self::get_referrals(env.clone(), referrer.clone());
        if referees.len() >= config.max_referrals_per_user {
            return Err(ReferralError::ReferralLimitReached);
        }

        env.storage()
            .persistent()
            .set(&DataKey::Referral(referee.clone()), &referrer);
        referees.push_back(referee.clone());
        env.storage()
            .persistent()
            .set(&DataKey::ReferralsList(referrer.clone()), &referees);

        let ledger = LedgerClient::new(&env, &config.ledger);
        let this = env.current_contract_address();
        if config.referrer_reward > 0 {
            ledger.credit(&this, &referrer, &config.referrer_reward, &Activity::Referral);
        }
        if config.referee_reward > 0 {
            ledger.credit(&this, &referee, &config.referee_reward, &Activity::Referral);
        }

        let mut stats = Self::stats(&env);
        stats.total_referrals += 1;
        stats.total_referrer_rewards += config.referrer_reward;
        stats.total_referee_rewards += config.referee_reward;
        env.storage().instance().set(&DataKey::ReferralStats, &stats);

        env.events().publish(
            (Symbol::new(&env, "referral_registered"), referee),
            (referrer.clone(), referral_code),
        );
        Ok(referrer)
    }

    pub fn get_referrer(env: Env, referee: Address) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Referral(referee))
    }

    pub fn get_referral_count(env: Env, member: Address) -> u32 {
        Self::get_referrals(env, member).len()
    }

    pub fn get_referrals(env: Env, member: Address) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::ReferralsList(member))
            .unwrap_or(Vec::new(&env))
    }

    // ───────────── STATISTICS ─────────────

    pub fn get_statistics(env: Env) -> ReferralStats {
        Self::stats(&env)
    }

    // ───────────── ADMIN ─────────────

    pub fn update_config(
        env: Env,
        admin: Address,
        referrer_reward: Option<i128>,
        referee_reward: Option<i128>,
        max_referrals_per_user: Option<u32>,
        min_referral_code_length: Option<u32>,
    ) -> Result<ReferralConfig, ReferralError> {
        admin.require_auth();
        let mut config = Self::config(&env)?;
        if config.admin != admin {
            return Err(ReferralError::Unauthorized);
        }

        if let Some(reward) = referrer_reward {
            config.referrer_reward = reward;
        }
        if let Some(reward) = referee_reward {
            config.referee_reward = reward;
        }
        if let Some(max) = max_referrals_per_user {
            config.max_referrals_per_user = max;
        }
        if let Some(length) = min_referral_code_length {
            config.min_referral_code_length = length;
        }

        if config.referrer_reward < 0
            || config.referee_reward < 0
            || config.max_referrals_per_user == 0
            || config.min_referral_code_length == 0
            || config.min_referral_code_length > MAX_CODE_LENGTH
        {
            return Err(ReferralError::InvalidConfig);
        }

        env.storage().instance().set(&DataKey::Config, &config);
        env.events().publish(
            (Symbol::new(&env, "config_updated"), admin),
            config.clone(),
        );
        Ok(config)
    }

    pub fn get_config(env: Env) -> Result<ReferralConfig, ReferralError> {
        Self::config(&env)
    }

    // ───────────── HELPERS ─────────────

    fn config(env: &Env) -> Result<ReferralConfig, ReferralError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(ReferralError::NotInitialized)
    }

    fn stats(env: &Env) -> ReferralStats {
        env.storage()
            .instance()
            .get(&DataKey::ReferralStats)
            .unwrap_or_default()
    }

    fn assign_code(env: &Env, member: &Address, code: &String) {
        env.storage()
            .persistent()
            .set(&DataKey::ReferralCode(member.clone()), code);
        env.storage()
            .persistent()
            .set(&DataKey::CodeOwner(code.clone()), member);

        let mut stats = Self::stats(env);
        stats.total_codes += 1;
        env.storage().instance().set(&DataKey::ReferralStats, &stats);

        env.events().publish(
            (Symbol::new(env, "referral_code"), member.clone()),
            code.clone(),
        );
    }

    /// Five characters of timestamp followed by seven of counter, base 32
    /// over an alphabet without 0/O and 1/I look-alikes. The counter part
    /// alone keeps generated codes distinct.
    fn encode_code(env: &Env, counter: u32, timestamp: u64) -> String {
        const CHARS: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

        let mut code = [0u8; GENERATED_CODE_LENGTH];
        let mut stamp = timestamp;
        for out in code[..5].iter_mut().rev() {
            *out = CHARS[(stamp % 32) as usize];
            stamp /= 32;
        }
        let mut count = counter as u64;
        for out in code[5..].iter_mut().rev() {
            *out = CHARS[(count % 32) as usize];
            count /= 32;
        }
        String::from_bytes(env, &code)
    }
}
