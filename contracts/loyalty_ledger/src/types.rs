use loyalty_core::Activity;
use soroban_sdk::{contracterror, contracttype, Address, String, Symbol};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidConfig = 4,
    InvalidAmount = 5,
    InsufficientPoints = 6,
    RewardNotFound = 7,
    RewardUnavailable = 8,
    RewardAlreadyRedeemed = 9,
    InvalidReward = 10,
    PromotionNotFound = 11,
    PromotionExists = 12,
    InvalidPromotion = 13,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    pub admin: Address,
    pub tax_bps: u32,           // e.g. 800 = 8%
    pub points_per_dollar: u32, // base earn rate before promotions
    pub history_limit: u32,     // entries kept per member
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardKind {
    Drink,
    Discount,
    Merchandise,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reward {
    pub id: Symbol,
    pub name: String,
    pub description: String,
    pub points_cost: i128,
    pub kind: RewardKind,
    pub available: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerEntry {
    pub activity: Activity,
    pub delta: i128,
    pub balance: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerStats {
    pub members: u32,
    pub total_issued: i128,
    pub total_redeemed: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Stats,
    Members,                  // Vec<Address>, join order
    Issuer(Address),          // bool
    Balance(Address),         // i128
    History(Address),         // Vec<LedgerEntry>
    Reward(Symbol),           // Reward
    RewardIds,                // Vec<Symbol>
    Redeemed(Address, Symbol),
    Promotion(Symbol),        // Promotion
    PromotionIds,             // Vec<Symbol>
}
