//! Tier, earning and redemption rules.
//!
//! Pure functions over already-validated values. Money is in cents, points
//! are whole points and one point is worth one cent. Nothing here touches
//! storage or fails: out-of-range inputs are clamped.

use soroban_sdk::{Symbol, Vec};

use crate::types::{CartLine, OrderQuote, Promotion, Tier, TierPerks, TierProgress};

/// Tier thresholds. Bronze: [0, SILVER), Silver: [SILVER, GOLD), Gold: [GOLD, ..)
pub const SILVER_MIN_POINTS: i128 = 500;
pub const GOLD_MIN_POINTS: i128 = 1_500;

pub const POINT_VALUE_CENTS: i128 = 1;
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Offered by default when a member opts into paying with points.
pub const SUGGESTED_REDEMPTION: i128 = 100;

/// Earn bonus per tier: Silver members earn 1.25x, Gold members 1.5x.
pub const SILVER_EARN_BONUS_BPS: u32 = 2_500;
pub const GOLD_EARN_BONUS_BPS: u32 = 5_000;

impl Tier {
    pub fn min_points(&self) -> i128 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => SILVER_MIN_POINTS,
            Tier::Gold => GOLD_MIN_POINTS,
        }
    }

    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => None,
        }
    }

    pub fn earn_bonus_bps(&self) -> u32 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => SILVER_EARN_BONUS_BPS,
            Tier::Gold => GOLD_EARN_BONUS_BPS,
        }
    }

    pub fn perks(&self) -> TierPerks {
        TierPerks {
            tier: *self,
            min_points: self.min_points(),
            earn_bonus_bps: self.earn_bonus_bps(),
        }
    }
}

impl Promotion {
    pub fn is_active(&self, now: u64) -> bool {
        self.starts_at <= now && now < self.ends_at
    }

    pub fn applies_to(&self, item_id: &Symbol) -> bool {
        match &self.item_id {
            Some(id) => id == item_id,
            None => true,
        }
    }
}

pub fn current_tier(balance: i128) -> Tier {
    if balance >= GOLD_MIN_POINTS {
        Tier::Gold
    } else if balance >= SILVER_MIN_POINTS {
        Tier::Silver
    } else {
        Tier::Bronze
    }
}

pub fn tier_progress(balance: i128) -> TierProgress {
    let current = current_tier(balance);
    let Some(next) = current.next() else {
        return TierProgress {
            current,
            next: None,
            percent_complete: 100,
            points_needed: 0,
        };
    };

    let span = next.min_points() - current.min_points();
    let gained = (balance - current.min_points()).clamp(0, span);
    TierProgress {
        current,
        next: Some(next),
        percent_complete: (gained * 100 / span) as u32,
        points_needed: next.min_points() - balance,
    }
}

pub fn points_earned(lines: &Vec<CartLine>) -> i128 {
    lines
        .iter()
        .map(|line| line.unit_points * line.quantity as i128)
        .sum()
}

pub fn subtotal(lines: &Vec<CartLine>) -> i128 {
    lines
        .iter()
        .map(|line| line.unit_price * line.quantity as i128)
        .sum()
}

/// Rounded half up to the cent.
pub fn tax_for(subtotal: i128, tax_bps: u32) -> i128 {
    (subtotal * tax_bps as i128 + BPS_DENOMINATOR / 2) / BPS_DENOMINATOR
}

/// Up to 100% of the subtotal may be paid in points.
pub fn max_redeemable(balance: i128, subtotal: i128) -> i128 {
    balance.min(subtotal / POINT_VALUE_CENTS).max(0)
}

pub fn clamp_redemption(requested: i128, max_redeemable: i128) -> i128 {
    requested.clamp(0, max_redeemable.max(0))
}

pub fn suggested_redemption(max_redeemable: i128) -> i128 {
    SUGGESTED_REDEMPTION.min(max_redeemable)
}

pub fn redemption_value(points: i128) -> i128 {
    points * POINT_VALUE_CENTS
}

/// Order total after the points discount, floored at zero. Points beyond what
/// the floor absorbs are not given back here.
pub fn apply_redemption(subtotal: i128, tax: i128, points_to_redeem: i128) -> i128 {
    (subtotal + tax - redemption_value(points_to_redeem)).max(0)
}

/// Base earn for one unit, rounded half up.
pub fn base_points(unit_price: i128, points_per_dollar: u32) -> i128 {
    (unit_price * points_per_dollar as i128 + 50) / 100
}

/// The tier bonus and every active promotion add their bps on top of the
/// base, so bonuses stack the same way regardless of the order they were
/// created in.
pub fn promoted_points(
    base: i128,
    tier_bonus_bps: u32,
    item_id: &Symbol,
    promotions: &Vec<Promotion>,
    now: u64,
) -> i128 {
    let promo_bps: i128 = promotions
        .iter()
        .filter(|promo| promo.is_active(now) && promo.applies_to(item_id))
        .map(|promo| promo.bonus_bps as i128)
        .sum();
    base * (BPS_DENOMINATOR + tier_bonus_bps as i128 + promo_bps) / BPS_DENOMINATOR
}

pub fn streak_bonus(streak: u32, per_day: i128) -> i128 {
    streak as i128 * per_day
}

pub fn quote(lines: &Vec<CartLine>, balance: i128, points_to_redeem: i128, tax_bps: u32) -> OrderQuote {
    let subtotal = subtotal(lines);
    let tax = tax_for(subtotal, tax_bps);
    let max_redeemable = max_redeemable(balance, subtotal);
    let points_redeemed = clamp_redemption(points_to_redeem, max_redeemable);

    OrderQuote {
        subtotal,
        tax,
        max_redeemable,
        points_redeemed,
        discount: redemption_value(points_redeemed),
        total: apply_redemption(subtotal, tax, points_redeemed),
        points_earned: points_earned(lines),
    }
}
