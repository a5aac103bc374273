use soroban_sdk::{contracttype, Address, Symbol};

/// Membership level, derived from a point balance and never stored.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierProgress {
    pub current: Tier,
    pub next: Option<Tier>,
    pub percent_complete: u32, // 0..=100, floored
    pub points_needed: i128,
}

/// What a tier earns on top of the base rate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierPerks {
    pub tier: Tier,
    pub min_points: i128,
    pub earn_bonus_bps: u32,
}

/// One line of a cart. Prices are in cents.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CartLine {
    pub item_id: Symbol,
    pub unit_price: i128,
    pub unit_points: i128,
    pub quantity: u32,
}

/// Why a balance moved. Recorded on every ledger entry.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Activity {
    Order,
    Redemption,
    Reward,
    Challenge,
    Referral,
    Streak,
    Share,
    Post,
    Wheel,
    Adjustment,
}

/// Extra points on top of the base rate while `starts_at <= now < ends_at`.
/// `item_id: None` applies to every item.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Promotion {
    pub id: Symbol,
    pub item_id: Option<Symbol>,
    pub bonus_bps: u32,
    pub starts_at: u64,
    pub ends_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderQuote {
    pub subtotal: i128,
    pub tax: i128,
    pub max_redeemable: i128,
    pub points_redeemed: i128,
    pub discount: i128,
    pub total: i128,
    pub points_earned: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Standing {
    pub rank: u32,
    pub member: Address,
    pub points: i128,
}
