use soroban_sdk::{contracterror, contracttype, Address, String, Symbol};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ChallengeError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidConfig = 4,
    InvalidChallenge = 5,
    ChallengeExists = 6,
    ChallengeNotFound = 7,
    ChallengeExpired = 8,
    ChallengeCompleted = 9,
    InvalidAmount = 10,
    AlreadyCheckedIn = 11,
    NoWheelPrizes = 12,
    InvalidPrize = 13,
    SpinCoolingDown = 14,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeConfig {
    pub admin: Address,
    pub ledger: Address,
    pub streak_bonus_per_day: i128, // bonus = streak * per_day
    pub streak_milestone: u32,      // bonus paid every N consecutive days
    pub spin_cooldown: u64,         // seconds between wheel spins
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChallengeKind {
    Daily,
    Weekly,
    Special,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Challenge {
    pub id: Symbol,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub points: i128,
    pub max_progress: u32,
    pub ends_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChallengeProgress {
    pub progress: u32,
    pub completed: bool,
    pub completed_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    pub last_day: u64, // days since epoch of the last check-in
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WheelPrize {
    pub id: u32,
    pub label: String,
    pub points: i128, // 0 for non-point prizes
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub member: Address,
    pub points: i128,
    pub streak: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Challenge(Symbol),
    ChallengeIds,
    Progress(Address, Symbol),
    Streak(Address),
    WheelPrizes,
    LastSpin(Address),
}
