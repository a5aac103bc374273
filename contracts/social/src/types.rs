use soroban_sdk::{contracterror, contracttype, Address, String, Symbol, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SocialError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidConfig = 4,
    EmptyText = 5,
    TextTooLong = 6,
    PostNotFound = 7,
    InvalidRating = 8,
    ReviewNotFound = 9,
    AlreadyMarkedHelpful = 10,
    OwnReview = 11,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SocialConfig {
    pub admin: Address,
    pub ledger: Address,
    pub post_reward: i128,
    pub max_rewarded_posts_per_day: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Post {
    pub id: u64,
    pub author: Address,
    pub text: String,
    pub drink: Option<Symbol>,
    pub hashtags: Vec<Symbol>,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
    pub points_earned: i128,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    pub author: Address,
    pub text: String,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Review {
    pub id: u64,
    pub author: Address,
    pub drink: Symbol,
    pub rating: u32,
    pub text: String,
    pub helpful: u32,
    pub created_at: u64,
}

/// Running totals behind the trending list.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DrinkStats {
    pub mentions: u32,
    pub rating_sum: u32,
    pub ratings: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrendingDrink {
    pub drink: Symbol,
    pub mentions: u32,
    pub avg_rating_x100: u32, // 0 when unrated
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    PostCounter,
    Post(u64),
    Liked(u64, Address),
    Comments(u64),
    AuthorPosts(Address),
    DailyPosts(Address),
    ReviewCounter,
    Review(u64),
    Helpful(u64, Address),
    Drinks,
    DrinkStats(Symbol),
}
