#![no_std]

mod storage;
pub mod types;

use loyalty_core::{rules, Activity, LedgerClient};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

use crate::storage::*;
use crate::types::*;

const SECONDS_PER_DAY: u64 = 86_400;

const EVT_CHECK_IN: Symbol = symbol_short!("check_in");

// ─────────────────────────────────────────────────────────────
// Contract
// ─────────────────────────────────────────────────────────────

#[contract]
pub struct Challenges;

#[contractimpl]
impl Challenges {
    pub fn initialize(
        env: Env,
        admin: Address,
        ledger: Address,
        streak_bonus_per_day: i128,
        streak_milestone: u32,
        spin_cooldown: u64,
    ) -> Result<(), ChallengeError> {
        if has_config(&env) {
            return Err(ChallengeError::AlreadyInitialized);
        }
        admin.require_auth();

        let config = ChallengeConfig {
            admin: admin.clone(),
            ledger,
            streak_bonus_per_day,
            streak_milestone,
            spin_cooldown,
        };
        Self::validate_config(&config)?;
        set_config(&env, &config);

        env.events().publish(
            (Symbol::new(&env, "init"), Symbol::new(&env, "challenges")),
            (admin, streak_milestone, spin_cooldown),
        );
        Ok(())
    }

    pub fn update_config(env: Env, admin: Address, config: ChallengeConfig) -> Result<(), ChallengeError> {
        Self::require_admin(&env, &admin)?;
        Self::validate_config(&config)?;
        set_config(&env, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<ChallengeConfig, ChallengeError> {
        get_config(&env)
    }

    // Challenges

    pub fn add_challenge(env: Env, admin: Address, challenge: Challenge) -> Result<(), ChallengeError> {
        Self::require_admin(&env, &admin)?;
        if challenge.max_progress == 0
            || challenge.points < 0
            || challenge.ends_at <= env.ledger().timestamp()
        {
            return Err(ChallengeError::InvalidChallenge);
        }
        if get_challenge(&env, &challenge.id).is_some() {
            return Err(ChallengeError::ChallengeExists);
        }

        let mut ids = get_challenge_ids(&env);
        ids.push_back(challenge.id.clone());
        set_challenge_ids(&env, &ids);
        set_challenge(&env, &challenge);
        Ok(())
    }

    pub fn get_challenge(env: Env, challenge_id: Symbol) -> Option<Challenge> {
        get_challenge(&env, &challenge_id)
    }

    pub fn list_challenges(env: Env, kind: Option<ChallengeKind>) -> Vec<Challenge> {
        let mut challenges = Vec::new(&env);
        for id in get_challenge_ids(&env).iter() {
            if let Some(challenge) = get_challenge(&env, &id) {
                if kind.map_or(true, |k| k == challenge.kind) {
                    challenges.push_back(challenge);
                }
            }
        }
        challenges
    }

    /// Advance a member's progress. Progress saturates at `max_progress`; the
    /// reward is credited once, on the call that completes the challenge.
    pub fn record_progress(
        env: Env,
        admin: Address,
        member: Address,
        challenge_id: Symbol,
        amount: u32,
    ) -> Result<ChallengeProgress, ChallengeError> {
        let config = Self::require_admin(&env, &admin)?;
        if amount == 0 {
            return Err(ChallengeError::InvalidAmount);
        }

        let challenge = get_challenge(&env, &challenge_id).ok_or(ChallengeError::ChallengeNotFound)?;
        let now = env.ledger().timestamp();
        if now >= challenge.ends_at {
            return Err(ChallengeError::ChallengeExpired);
        }

        let mut progress = get_progress(&env, &member, &challenge_id);
        if progress.completed {
            return Err(ChallengeError::ChallengeCompleted);
        }

        progress.progress = progress
            .progress
            .saturating_add(amount)
            .min(challenge.max_progress);

        if progress.progress == challenge.max_progress {
            progress.completed = true;
            progress.completed_at = now;

            if challenge.points > 0 {
                LedgerClient::new(&env, &config.ledger).credit(
                    &env.current_contract_address(),
                    &member,
                    &challenge.points,
                    &Activity::Challenge,
                );
            }
            env.events().publish(
                (Symbol::new(&env, "challenge_completed"), member.clone()),
                (challenge_id.clone(), challenge.points),
            );
        }

        set_progress(&env, &member, &challenge_id, &progress);
        Ok(progress)
    }

    pub fn progress(env: Env, member: Address, challenge_id: Symbol) -> ChallengeProgress {
        get_progress(&env, &member, &challenge_id)
    }

    /// Seconds until the challenge closes, 0 once it has.
    pub fn time_left(env: Env, challenge_id: Symbol) -> Result<u64, ChallengeError> {
        let challenge = get_challenge(&env, &challenge_id).ok_or(ChallengeError::ChallengeNotFound)?;
        Ok(challenge.ends_at.saturating_sub(env.ledger().timestamp()))
    }

    // Streaks

    /// Record today's visit. Consecutive days extend the streak, a missed day
    /// starts over at 1. Every `streak_milestone` days pays the streak bonus.
    pub fn check_in(env: Env, member: Address) -> Result<Streak, ChallengeError> {
        member.require_auth();
        let config = get_config(&env)?;

        let today = env.ledger().timestamp() / SECONDS_PER_DAY;
        let mut streak = get_streak(&env, &member);
        if streak.current > 0 && streak.last_day == today {
            return Err(ChallengeError::AlreadyCheckedIn);
        }

        streak.current = if streak.current > 0 && streak.last_day + 1 == today {
            streak.current + 1
        } else {
            1
        };
        streak.longest = streak.longest.max(streak.current);
        streak.last_day = today;
        set_streak(&env, &member, &streak);

        let mut bonus = 0;
        if streak.current % config.streak_milestone == 0 {
            bonus = rules::streak_bonus(streak.current, config.streak_bonus_per_day);
            if bonus > 0 {
                LedgerClient::new(&env, &config.ledger).credit(
                    &env.current_contract_address(),
                    &member,
                    &bonus,
                    &Activity::Streak,
                );
            }
        }

        env.events()
            .publish((EVT_CHECK_IN, member), (streak.current, bonus));
        Ok(streak)
    }

    /// The member's streak as of today; a streak with a missed day reads as 0.
    pub fn streak(env: Env, member: Address) -> Streak {
        let mut streak = get_streak(&env, &member);
        streak.current = Self::live_streak(&env, &streak);
        streak
    }

    /// Bonus shown on the streak badge.
    pub fn streak_bonus(env: Env, member: Address) -> Result<i128, ChallengeError> {
        let config = get_config(&env)?;
        let streak = get_streak(&env, &member);
        Ok(rules::streak_bonus(
            Self::live_streak(&env, &streak),
            config.streak_bonus_per_day,
        ))
    }

    // Prize wheel

    pub fn set_wheel_prizes(env: Env, admin: Address, prizes: Vec<WheelPrize>) -> Result<(), ChallengeError> {
        Self::require_admin(&env, &admin)?;
        for prize in prizes.iter() {
            if prize.points < 0 {
                return Err(ChallengeError::InvalidPrize);
            }
        }
        set_wheel_prizes(&env, &prizes);
        Ok(())
    }

    pub fn wheel_prizes(env: Env) -> Vec<WheelPrize> {
        get_wheel_prizes(&env)
    }

    /// Draw a prize uniformly. Point prizes are credited straight away.
    pub fn spin_wheel(env: Env, member: Address) -> Result<WheelPrize, ChallengeError> {
        member.require_auth();
        let config = get_config(&env)?;

        let prizes = get_wheel_prizes(&env);
        if prizes.is_empty() {
            return Err(ChallengeError::NoWheelPrizes);
        }

        let now = env.ledger().timestamp();
        if let Some(last) = get_last_spin(&env, &member) {
            if now < last.saturating_add(config.spin_cooldown) {
                return Err(ChallengeError::SpinCoolingDown);
            }
        }

        let index = env.prng().gen_range::<u64>(0..prizes.len() as u64) as u32;
        let prize = prizes.get_unchecked(index);
        set_last_spin(&env, &member, now);

        if prize.points > 0 {
            LedgerClient::new(&env, &config.ledger).credit(
                &env.current_contract_address(),
                &member,
                &prize.points,
                &Activity::Wheel,
            );
        }

        env.events().publish(
            (Symbol::new(&env, "wheel_spin"), member),
            (prize.id, prize.points),
        );
        Ok(prize)
    }

    pub fn last_spin(env: Env, member: Address) -> Option<u64> {
        get_last_spin(&env, &member)
    }

    // Leaderboard

    pub fn leaderboard(env: Env, limit: u32) -> Result<Vec<LeaderboardEntry>, ChallengeError> {
        let config = get_config(&env)?;
        let standings = LedgerClient::new(&env, &config.ledger).leaderboard(&limit);

        let mut entries = Vec::new(&env);
        for standing in standings.iter() {
            let streak = get_streak(&env, &standing.member);
            entries.push_back(LeaderboardEntry {
                rank: standing.rank,
                points: standing.points,
                streak: Self::live_streak(&env, &streak),
                member: standing.member,
            });
        }
        Ok(entries)
    }

    // ────────────────────────────────
    // Internal helpers
    // ────────────────────────────────

    fn validate_config(config: &ChallengeConfig) -> Result<(), ChallengeError> {
        if config.streak_milestone == 0 || config.streak_bonus_per_day < 0 {
            return Err(ChallengeError::InvalidConfig);
        }
        Ok(())
    }

    fn require_admin(env: &Env, admin: &Address) -> Result<ChallengeConfig, ChallengeError> {
        admin.require_auth();
        let config = get_config(env)?;
        if config.admin != *admin {
            return Err(ChallengeError::Unauthorized);
        }
        Ok(config)
    }

    fn live_streak(env: &Env, streak: &Streak) -> u32 {
        let today = env.ledger().timestamp() / SECONDS_PER_DAY;
        if streak.current > 0 && today <= streak.last_day + 1 {
            streak.current
        } else {
            0
        }
    }
}
