use loyalty_core::CartLine;
use soroban_sdk::{contracterror, contracttype, Address, String, Symbol, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CheckoutError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidConfig = 4,
    InvalidPrice = 5,
    ItemExists = 6,
    ItemNotFound = 7,
    EmptyCart = 8,
    OrderNotFound = 9,
    NotOrderOwner = 10,
    AlreadyShared = 11,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckoutConfig {
    pub admin: Address,
    pub ledger: Address,
    pub share_bonus: i128, // points for sharing a placed order
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuCategory {
    Hot,
    Cold,
    Seasonal,
    Snacks,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MenuItem {
    pub id: Symbol,
    pub name: String,
    pub description: String,
    pub category: MenuCategory,
    pub price: i128, // cents
    pub popular: bool,
    pub recommended: bool,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaymentMethod {
    Card,
    Upi,
    Wallet,
    CashOnDelivery,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    pub id: u64,
    pub customer: Address,
    pub lines: Vec<CartLine>,
    pub payment: PaymentMethod,
    pub subtotal: i128,
    pub tax: i128,
    pub points_redeemed: i128,
    pub discount: i128,
    pub total: i128,
    pub points_earned: i128,
    pub placed_at: u64,
    pub shared: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustomerStats {
    pub total_orders: u32,
    pub total_spent: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    MenuItem(Symbol),
    MenuIds,                 // Vec<Symbol>, insertion order
    Cart(Address),           // Vec<CartLine>
    Order(u64),
    OrderCount,
    CustomerOrders(Address), // Vec<u64>
    CustomerStats(Address),
    Favorites(Address),      // Vec<Symbol>
}
