#![no_std]

//! Menu, carts and order placement.
//!
//! Prices live here; points never do. Every cart is priced by the loyalty
//! ledger at read time, and placing an order moves points through the ledger
//! as an authorized issuer.

mod storage;
pub mod types;

use loyalty_core::{rules, Activity, CartLine, LedgerClient, OrderQuote};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol, Vec};

use crate::storage::*;
use crate::types::*;

#[contract]
pub struct Checkout;

#[contractimpl]
impl Checkout {
    pub fn initialize(env: Env, admin: Address, ledger: Address, share_bonus: i128) -> Result<(), CheckoutError> {
        if has_config(&env) {
            return Err(CheckoutError::AlreadyInitialized);
        }
        admin.require_auth();
        if share_bonus < 0 {
            return Err(CheckoutError::InvalidConfig);
        }

        set_config(
            &env,
            &CheckoutConfig {
                admin: admin.clone(),
                ledger: ledger.clone(),
                share_bonus,
            },
        );

        env.events().publish(
            (Symbol::new(&env, "init"), Symbol::new(&env, "checkout")),
            (admin, ledger, share_bonus),
        );
        Ok(())
    }

    pub fn update_config(env: Env, admin: Address, config: CheckoutConfig) -> Result<(), CheckoutError> {
        Self::require_admin(&env, &admin)?;
        if config.share_bonus < 0 {
            return Err(CheckoutError::InvalidConfig);
        }
        set_config(&env, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<CheckoutConfig, CheckoutError> {
        get_config(&env)
    }

    // ───────────── MENU ─────────────

    pub fn add_menu_item(env: Env, admin: Address, item: MenuItem) -> Result<(), CheckoutError> {
        Self::require_admin(&env, &admin)?;
        if item.price <= 0 {
            return Err(CheckoutError::InvalidPrice);
        }
        if get_menu_item(&env, &item.id).is_some() {
            return Err(CheckoutError::ItemExists);
        }

        let mut ids = get_menu_ids(&env);
        ids.push_back(item.id.clone());
        set_menu_ids(&env, &ids);
        set_menu_item(&env, &item);
        Ok(())
    }

    pub fn remove_menu_item(env: Env, admin: Address, item_id: Symbol) -> Result<(), CheckoutError> {
        Self::require_admin(&env, &admin)?;
        if get_menu_item(&env, &item_id).is_none() {
            return Err(CheckoutError::ItemNotFound);
        }

        let mut ids = get_menu_ids(&env);
        if let Some(index) = ids.first_index_of(&item_id) {
            ids.remove(index);
        }
        set_menu_ids(&env, &ids);
        remove_menu_item(&env, &item_id);
        Ok(())
    }

    pub fn get_menu_item(env: Env, item_id: Symbol) -> Option<MenuItem> {
        get_menu_item(&env, &item_id)
    }

    /// Menu in insertion order, optionally for one category.
    pub fn menu(env: Env, category: Option<MenuCategory>) -> Vec<MenuItem> {
        let mut items = Vec::new(&env);
        for id in get_menu_ids(&env).iter() {
            if let Some(item) = get_menu_item(&env, &id) {
                if category.map_or(true, |c| c == item.category) {
                    items.push_back(item);
                }
            }
        }
        items
    }

    // ───────────── CART ─────────────

    pub fn add_to_cart(env: Env, member: Address, item_id: Symbol) -> Result<u32, CheckoutError> {
        member.require_auth();
        let item = get_menu_item(&env, &item_id).ok_or(CheckoutError::ItemNotFound)?;

        let mut cart = get_cart(&env, &member);
        let quantity = match Self::line_index(&cart, &item_id) {
            Some(index) => {
                let mut line = cart.get_unchecked(index);
                line.quantity += 1;
                cart.set(index, line);
                cart.get_unchecked(index).quantity
            }
            None => {
                cart.push_back(CartLine {
                    item_id,
                    unit_price: item.price,
                    unit_points: 0,
                    quantity: 1,
                });
                1
            }
        };
        set_cart(&env, &member, &cart);
        Ok(quantity)
    }

    /// Adjust a line by `change`. The quantity never drops below zero and a
    /// line that reaches zero leaves the cart.
    pub fn update_quantity(env: Env, member: Address, item_id: Symbol, change: i32) -> Result<u32, CheckoutError> {
        member.require_auth();

        let mut cart = get_cart(&env, &member);
        let index = Self::line_index(&cart, &item_id).ok_or(CheckoutError::ItemNotFound)?;
        let mut line = cart.get_unchecked(index);
        let quantity = (line.quantity as i64 + change as i64).max(0) as u32;

        if quantity == 0 {
            cart.remove(index);
        } else {
            line.quantity = quantity;
            cart.set(index, line);
        }
        set_cart(&env, &member, &cart);
        Ok(quantity)
    }

    /// The member's cart at current menu prices, with points filled in by the
    /// ledger at the member's tier.
    pub fn get_cart(env: Env, member: Address) -> Result<Vec<CartLine>, CheckoutError> {
        let cart = Self::current_cart(&env, &member)?;
        if cart.is_empty() {
            return Ok(cart);
        }
        let config = get_config(&env)?;
        Ok(LedgerClient::new(&env, &config.ledger).price_cart_for(&member, &cart))
    }

    pub fn cart_count(env: Env, member: Address) -> u32 {
        get_cart(&env, &member).iter().map(|line| line.quantity).sum()
    }

    pub fn clear_cart(env: Env, member: Address) {
        member.require_auth();
        set_cart(&env, &member, &Vec::new(&env));
    }

    // ───────────── ORDERS ─────────────

    pub fn quote(env: Env, member: Address, points_to_redeem: i128) -> Result<OrderQuote, CheckoutError> {
        let config = get_config(&env)?;
        let cart = Self::current_cart(&env, &member)?;
        Ok(LedgerClient::new(&env, &config.ledger).quote(&member, &cart, &points_to_redeem))
    }

    /// Points offered by default when the member chooses to pay with points.
    pub fn suggested_redemption(env: Env, member: Address) -> Result<i128, CheckoutError> {
        let quote = Self::quote(env, member, 0)?;
        Ok(rules::suggested_redemption(quote.max_redeemable))
    }

    /// Place the current cart as an order.
    ///
    /// The redemption is clamped to what the member can redeem against this
    /// subtotal. Points are earned on the full cart, before the discount.
    pub fn place_order(
        env: Env,
        member: Address,
        payment: PaymentMethod,
        points_to_redeem: i128,
    ) -> Result<Order, CheckoutError> {
        member.require_auth();
        let config = get_config(&env)?;

        let cart = Self::current_cart(&env, &member)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let ledger = LedgerClient::new(&env, &config.ledger);
        let quote = ledger.quote(&member, &cart, &points_to_redeem);
        let lines = ledger.price_cart_for(&member, &cart);

        let this = env.current_contract_address();
        if quote.points_redeemed > 0 {
            ledger.debit(&this, &member, &quote.points_redeemed, &Activity::Redemption);
        }
        if quote.points_earned > 0 {
            ledger.credit(&this, &member, &quote.points_earned, &Activity::Order);
        }

        let order = Order {
            id: next_order_id(&env),
            customer: member.clone(),
            lines,
            payment,
            subtotal: quote.subtotal,
            tax: quote.tax,
            points_redeemed: quote.points_redeemed,
            discount: quote.discount,
            total: quote.total,
            points_earned: quote.points_earned,
            placed_at: env.ledger().timestamp(),
            shared: false,
        };
        set_order(&env, &order);
        push_customer_order(&env, &member, order.id);

        let mut stats = get_customer_stats(&env, &member);
        stats.total_orders += 1;
        stats.total_spent += order.total;
        set_customer_stats(&env, &member, &stats);

        set_cart(&env, &member, &Vec::new(&env));

        env.events().publish(
            (Symbol::new(&env, "order_placed"), member),
            (order.id, order.total, order.points_earned, order.points_redeemed),
        );
        Ok(order)
    }

    /// Share a placed order for a one-time bonus. Returns the points credited.
    pub fn share_order(env: Env, member: Address, order_id: u64, platform: Symbol) -> Result<i128, CheckoutError> {
        member.require_auth();
        let config = get_config(&env)?;

        let mut order = get_order(&env, order_id).ok_or(CheckoutError::OrderNotFound)?;
        if order.customer != member {
            return Err(CheckoutError::NotOrderOwner);
        }
        if order.shared {
            return Err(CheckoutError::AlreadyShared);
        }

        order.shared = true;
        set_order(&env, &order);

        if config.share_bonus > 0 {
            LedgerClient::new(&env, &config.ledger).credit(
                &env.current_contract_address(),
                &member,
                &config.share_bonus,
                &Activity::Share,
            );
        }

        env.events().publish(
            (Symbol::new(&env, "order_shared"), member),
            (order_id, platform),
        );
        Ok(config.share_bonus)
    }

    pub fn get_order(env: Env, order_id: u64) -> Option<Order> {
        get_order(&env, order_id)
    }

    /// Newest first.
    pub fn order_history(env: Env, member: Address) -> Vec<Order> {
        let ids = get_customer_orders(&env, &member);
        let mut orders = Vec::new(&env);
        for id in ids.iter().rev() {
            if let Some(order) = get_order(&env, id) {
                orders.push_back(order);
            }
        }
        orders
    }

    pub fn customer_stats(env: Env, member: Address) -> CustomerStats {
        get_customer_stats(&env, &member)
    }

    // ───────────── FAVORITES ─────────────

    /// Returns whether the item is a favorite after the toggle.
    pub fn toggle_favorite(env: Env, member: Address, item_id: Symbol) -> Result<bool, CheckoutError> {
        member.require_auth();
        if get_menu_item(&env, &item_id).is_none() {
            return Err(CheckoutError::ItemNotFound);
        }

        let mut favorites = get_favorites(&env, &member);
        let favorite = match favorites.first_index_of(&item_id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push_back(item_id);
                true
            }
        };
        set_favorites(&env, &member, &favorites);
        Ok(favorite)
    }

    pub fn favorites(env: Env, member: Address) -> Vec<MenuItem> {
        let mut items = Vec::new(&env);
        for id in get_favorites(&env, &member).iter() {
            if let Some(item) = get_menu_item(&env, &id) {
                items.push_back(item);
            }
        }
        items
    }

    // ───────────── HELPERS ─────────────

    fn require_admin(env: &Env, admin: &Address) -> Result<CheckoutConfig, CheckoutError> {
        admin.require_auth();
        let config = get_config(env)?;
        if config.admin != *admin {
            return Err(CheckoutError::Unauthorized);
        }
        Ok(config)
    }

    /// The stored cart checked against the menu. Every line must still be
    /// listed and is charged the item's current price.
    fn current_cart(env: &Env, member: &Address) -> Result<Vec<CartLine>, CheckoutError> {
        let mut cart = get_cart(env, member);
        for index in 0..cart.len() {
            let mut line = cart.get_unchecked(index);
            let Some(item) = get_menu_item(env, &line.item_id) else {
                log!(env, "cart line no longer on the menu", member.clone(), line.item_id);
                return Err(CheckoutError::ItemNotFound);
            };
            line.unit_price = item.price;
            cart.set(index, line);
        }
        Ok(cart)
    }

    fn line_index(cart: &Vec<CartLine>, item_id: &Symbol) -> Option<u32> {
        cart.iter()
            .position(|line| line.item_id == *item_id)
            .map(|index| index as u32)
    }
}
