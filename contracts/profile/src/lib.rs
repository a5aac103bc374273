#![no_std]

use loyalty_core::{LedgerClient, Tier, TierProgress};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, Env, String, Symbol, Vec,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProfileError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    AlreadyRegistered = 3,
    NotRegistered = 4,
    InvalidDetails = 5,
    InvalidUsername = 6,
    Unauthorized = 7,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileConfig {
    pub admin: Address,
    pub ledger: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NotificationPrefs {
    pub order_updates: bool,
    pub promotions: bool,
    pub points_expiry: bool,
    pub new_products: bool,
}

impl NotificationPrefs {
    pub fn all_on() -> Self {
        NotificationPrefs {
            order_updates: true,
            promotions: true,
            points_expiry: true,
            new_products: true,
        }
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Twitter,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub username: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    pub member: Address,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub joined_at: u64,
    pub notifications: NotificationPrefs,
    pub socials: Vec<SocialLink>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileSummary {
    pub profile: Profile,
    pub points: i128,
    pub tier: Tier,
    pub progress: TierProgress,
}

#[contracttype]
pub enum DataKey {
    Config,
    Profile(Address),
    MemberCount,
}

const MAX_FIELD_LEN: u32 = 64;

#[contract]
pub struct ProfileContract;

#[contractimpl]
impl ProfileContract {
    pub fn initialize(env: Env, admin: Address, ledger: Address) -> Result<(), ProfileError> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(ProfileError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(
            &DataKey::Config,
            &ProfileConfig {
                admin: admin.clone(),
                ledger: ledger.clone(),
            },
        );
        env.events().publish(
            (Symbol::new(&env, "init"), Symbol::new(&env, "profile")),
            (admin, ledger),
        );
        Ok(())
    }

    /// Point the contract at a different ledger or hand it to a new admin.
    pub fn update_config(env: Env, admin: Address, config: ProfileConfig) -> Result<(), ProfileError> {
        admin.require_auth();
        if Self::config(&env)?.admin != admin {
            return Err(ProfileError::Unauthorized);
        }
        env.storage().instance().set(&DataKey::Config, &config);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<ProfileConfig, ProfileError> {
        Self::config(&env)
    }

    /// Create the member's profile. Every notification starts switched on.
    pub fn register(
        env: Env,
        member: Address,
        name: String,
        email: String,
        phone: String,
    ) -> Result<Profile, ProfileError> {
        member.require_auth();
        Self::config(&env)?;
        if env.storage().persistent().has(&DataKey::Profile(member.clone())) {
            return Err(ProfileError::AlreadyRegistered);
        }
        Self::check_details(&name, &email, &phone)?;

        let profile = Profile {
            member: member.clone(),
            name,
            email,
            phone,
            joined_at: env.ledger().timestamp(),
            notifications: NotificationPrefs::all_on(),
            socials: Vec::new(&env),
        };
        Self::save(&env, &profile);

        let count: u32 = env
            .storage()
            .instance()
            .get(&DataKey::MemberCount)
            .unwrap_or(0);
        env.storage().instance().set(&DataKey::MemberCount, &(count + 1));

        env.events().publish(
            (Symbol::new(&env, "profile_registered"), member),
            profile.joined_at,
        );
        Ok(profile)
    }

    pub fn update_details(
        env: Env,
        member: Address,
        name: String,
        email: String,
        phone: String,
    ) -> Result<Profile, ProfileError> {
        member.require_auth();
        Self::check_details(&name, &email, &phone)?;

        let mut profile = Self::load(&env, &member)?;
        profile.name = name;
        profile.email = email;
        profile.phone = phone;
        Self::save(&env, &profile);
        Ok(profile)
    }

    pub fn set_notifications(
        env: Env,
        member: Address,
        prefs: NotificationPrefs,
    ) -> Result<(), ProfileError> {
        member.require_auth();
        let mut profile = Self::load(&env, &member)?;
        profile.notifications = prefs;
        Self::save(&env, &profile);
        Ok(())
    }

    /// Link an account on `platform`, replacing any earlier link to it.
    pub fn link_social(
        env: Env,
        member: Address,
        platform: SocialPlatform,
        username: String,
    ) -> Result<(), ProfileError> {
        member.require_auth();
        if username.is_empty() || username.len() > MAX_FIELD_LEN {
            return Err(ProfileError::InvalidUsername);
        }

        let mut profile = Self::load(&env, &member)?;
        let link = SocialLink { platform, username };
        match Self::link_index(&profile.socials, platform) {
            Some(index) => profile.socials.set(index, link),
            None => profile.socials.push_back(link),
        }
        Self::save(&env, &profile);
        Ok(())
    }

    /// Returns whether a link was removed.
    pub fn unlink_social(env: Env, member: Address, platform: SocialPlatform) -> Result<bool, ProfileError> {
        member.require_auth();
        let mut profile = Self::load(&env, &member)?;
        let Some(index) = Self::link_index(&profile.socials, platform) else {
            return Ok(false);
        };
        profile.socials.remove(index);
        Self::save(&env, &profile);
        Ok(true)
    }

    pub fn get_profile(env: Env, member: Address) -> Option<Profile> {
        env.storage().persistent().get(&DataKey::Profile(member))
    }

    /// The profile together with the member's standing on the ledger.
    pub fn summary(env: Env, member: Address) -> Result<ProfileSummary, ProfileError> {
        let config = Self::config(&env)?;
        let profile = Self::load(&env, &member)?;

        let ledger = LedgerClient::new(&env, &config.ledger);
        let progress = ledger.tier_progress(&member);
        Ok(ProfileSummary {
            profile,
            points: ledger.balance(&member),
            tier: progress.current,
            progress,
        })
    }

    pub fn member_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::MemberCount)
            .unwrap_or(0)
    }

    fn config(env: &Env) -> Result<ProfileConfig, ProfileError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(ProfileError::NotInitialized)
    }

    fn load(env: &Env, member: &Address) -> Result<Profile, ProfileError> {
        env.storage()
            .persistent()
            .get(&DataKey::Profile(member.clone()))
            .ok_or(ProfileError::NotRegistered)
    }

    fn save(env: &Env, profile: &Profile) {
        env.storage()
            .persistent()
            .set(&DataKey::Profile(profile.member.clone()), profile);
    }

    fn check_details(name: &String, email: &String, phone: &String) -> Result<(), ProfileError> {
        if name.is_empty() || name.len() > MAX_FIELD_LEN {
            return Err(ProfileError::InvalidDetails);
        }
        // contact fields are optional but bounded
        if email.len() > MAX_FIELD_LEN || phone.len() > MAX_FIELD_LEN {
            return Err(ProfileError::InvalidDetails);
        }
        Ok(())
    }

    fn link_index(socials: &Vec<SocialLink>, platform: SocialPlatform) -> Option<u32> {
        socials
            .iter()
            .position(|link| link.platform == platform)
            .map(|index| index as u32)
    }
}
