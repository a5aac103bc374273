use loyalty_core::CartLine;
use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::types::{CheckoutConfig, CheckoutError, CustomerStats, DataKey, MenuItem, Order};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &CheckoutConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<CheckoutConfig, CheckoutError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(CheckoutError::NotInitialized)
}

pub fn get_menu_item(env: &Env, id: &Symbol) -> Option<MenuItem> {
    env.storage().persistent().get(&DataKey::MenuItem(id.clone()))
}

pub fn set_menu_item(env: &Env, item: &MenuItem) {
    env.storage()
        .persistent()
        .set(&DataKey::MenuItem(item.id.clone()), item);
}

pub fn remove_menu_item(env: &Env, id: &Symbol) {
    env.storage().persistent().remove(&DataKey::MenuItem(id.clone()));
}

pub fn get_menu_ids(env: &Env) -> Vec<Symbol> {
    env.storage()
        .persistent()
        .get(&DataKey::MenuIds)
        .unwrap_or(Vec::new(env))
}

pub fn set_menu_ids(env: &Env, ids: &Vec<Symbol>) {
    env.storage().persistent().set(&DataKey::MenuIds, ids);
}

pub fn get_cart(env: &Env, member: &Address) -> Vec<CartLine> {
    env.storage()
        .persistent()
        .get(&DataKey::Cart(member.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn set_cart(env: &Env, member: &Address, cart: &Vec<CartLine>) {
    if cart.is_empty() {
        env.storage().persistent().remove(&DataKey::Cart(member.clone()));
    } else {
        env.storage().persistent().set(&DataKey::Cart(member.clone()), cart);
    }
}

pub fn next_order_id(env: &Env) -> u64 {
    let count: u64 = env
        .storage()
        .instance()
        .get(&DataKey::OrderCount)
        .unwrap_or(0);
    let id = count + 1;
    env.storage().instance().set(&DataKey::OrderCount, &id);
    id
}

pub fn get_order(env: &Env, id: u64) -> Option<Order> {
    env.storage().persistent().get(&DataKey::Order(id))
}

pub fn set_order(env: &Env, order: &Order) {
    env.storage().persistent().set(&DataKey::Order(order.id), order);
}

pub fn get_customer_orders(env: &Env, member: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::CustomerOrders(member.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn push_customer_order(env: &Env, member: &Address, id: u64) {
    let mut ids = get_customer_orders(env, member);
    ids.push_back(id);
    env.storage()
        .persistent()
        .set(&DataKey::CustomerOrders(member.clone()), &ids);
}

pub fn get_customer_stats(env: &Env, member: &Address) -> CustomerStats {
    env.storage()
        .persistent()
        .get(&DataKey::CustomerStats(member.clone()))
        .unwrap_or(CustomerStats {
            total_orders: 0,
            total_spent: 0,
        })
}

pub fn set_customer_stats(env: &Env, member: &Address, stats: &CustomerStats) {
    env.storage()
        .persistent()
        .set(&DataKey::CustomerStats(member.clone()), stats);
}

pub fn get_favorites(env: &Env, member: &Address) -> Vec<Symbol> {
    env.storage()
        .persistent()
        .get(&DataKey::Favorites(member.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn set_favorites(env: &Env, member: &Address, favorites: &Vec<Symbol>) {
    env.storage()
        .persistent()
        .set(&DataKey::Favorites(member.clone()), favorites);
}
