use soroban_sdk::{contractclient, Address, Env, Vec};

use crate::types::{Activity, CartLine, OrderQuote, Standing, Tier, TierPerks, TierProgress};

/// The part of the loyalty ledger contract other contracts call into.
///
/// Balance-moving calls must come from an address the ledger admin has
/// authorized as an issuer; contracts pass their own address.
#[contractclient(name = "LedgerClient")]
pub trait LedgerInterface {
    fn credit(env: Env, issuer: Address, member: Address, amount: i128, activity: Activity) -> i128;

    fn debit(env: Env, issuer: Address, member: Address, amount: i128, activity: Activity) -> i128;

    fn balance(env: Env, member: Address) -> i128;

    fn tier(env: Env, member: Address) -> Tier;

    fn tier_progress(env: Env, member: Address) -> TierProgress;

    fn perks(env: Env, tier: Tier) -> TierPerks;

    fn price_cart(env: Env, lines: Vec<CartLine>) -> Vec<CartLine>;

    fn price_cart_for(env: Env, member: Address, lines: Vec<CartLine>) -> Vec<CartLine>;

    fn quote(env: Env, member: Address, lines: Vec<CartLine>, points_to_redeem: i128) -> OrderQuote;

    fn leaderboard(env: Env, limit: u32) -> Vec<Standing>;
}
