// Static game data: shop items, trophies and redeem codes.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopCategory {
    Planes,
    Customization,
    Performance,
    Audio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Skin,
    Upgrade,
    Plane,
    Audio,
    Sticker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ShopCategory,
    pub kind: ItemKind,
    pub price: u64,
    pub description: &'static str,
    /// Relative rating shown next to the item (0-100).
    pub stat_boost: u8,
}

pub const TURBO_ITEM_ID: &str = "engine_turbo";
pub const DEFAULT_SKIN_ID: &str = "skin_default";
pub const DEFAULT_PLANE_ID: &str = "plane_default";

/// Items every new pilot owns.
pub const STARTING_INVENTORY: [&str; 4] = ["plane_default", "skin_default", "engine_v1", "sound_stock"];

pub const SHOP_ITEMS: [ShopItem; 12] = [
    ShopItem {
        id: "plane_default",
        name: "Cessna Classic",
        category: ShopCategory::Planes,
        kind: ItemKind::Plane,
        price: 0,
        description: "Reliable and stable.",
        stat_boost: 10,
    },
    ShopItem {
        id: "plane_jet",
        name: "F-22 Raptor",
        category: ShopCategory::Planes,
        kind: ItemKind::Plane,
        price: 50_000,
        description: "Supersonic military jet.",
        stat_boost: 90,
    },
    ShopItem {
        id: "skin_default",
        name: "Factory Paint",
        category: ShopCategory::Customization,
        kind: ItemKind::Skin,
        price: 0,
        description: "Straight off the line.",
        stat_boost: 0,
    },
    ShopItem {
        id: "skin_gold",
        name: "Royal Gold",
        category: ShopCategory::Customization,
        kind: ItemKind::Skin,
        price: 1_500,
        description: "Luxury finish.",
        stat_boost: 0,
    },
    ShopItem {
        id: "skin_stealth",
        name: "Tactical Black",
        category: ShopCategory::Customization,
        kind: ItemKind::Skin,
        price: 3_000,
        description: "Invisible at night.",
        stat_boost: 0,
    },
    ShopItem {
        id: "sticker_flames",
        name: "Flame Decals",
        category: ShopCategory::Customization,
        kind: ItemKind::Sticker,
        price: 500,
        description: "Adds five psychological horsepower.",
        stat_boost: 0,
    },
    ShopItem {
        id: "engine_v1",
        name: "Stock V1 Engine",
        category: ShopCategory::Performance,
        kind: ItemKind::Upgrade,
        price: 0,
        description: "Standard engine.",
        stat_boost: 20,
    },
    ShopItem {
        id: "engine_turbo",
        name: "Turbo MK1",
        category: ShopCategory::Performance,
        kind: ItemKind::Upgrade,
        price: 2_000,
        description: "Raises top speed.",
        stat_boost: 50,
    },
    ShopItem {
        id: "nitro_boost",
        name: "Nitro Injection",
        category: ShopCategory::Performance,
        kind: ItemKind::Upgrade,
        price: 5_000,
        description: "Explosive acceleration.",
        stat_boost: 80,
    },
    ShopItem {
        id: "sound_stock",
        name: "Stock Sound",
        category: ShopCategory::Audio,
        kind: ItemKind::Audio,
        price: 0,
        description: "Standard engine note.",
        stat_boost: 0,
    },
    ShopItem {
        id: "sound_jet",
        name: "Jet Turbine",
        category: ShopCategory::Audio,
        kind: ItemKind::Audio,
        price: 1_000,
        description: "High-pitched turbine whine.",
        stat_boost: 0,
    },
    ShopItem {
        id: "sound_bass",
        name: "Bass Boosted",
        category: ShopCategory::Audio,
        kind: ItemKind::Audio,
        price: 800,
        description: "Heavier rumble under turbo.",
        stat_boost: 0,
    },
];

pub fn find_item(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrophyId {
    FirstFlight,
    Rich,
    HighFlyer,
    Spender,
}

impl TrophyId {
    pub const ALL: [TrophyId; 4] = [
        TrophyId::FirstFlight,
        TrophyId::Rich,
        TrophyId::HighFlyer,
        TrophyId::Spender,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TrophyId::FirstFlight => "first_flight",
            TrophyId::Rich => "rich",
            TrophyId::HighFlyer => "high_flyer",
            TrophyId::Spender => "spender",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TrophyId::FirstFlight => "First Flight",
            TrophyId::Rich => "Tycoon",
            TrophyId::HighFlyer => "Astronaut",
            TrophyId::Spender => "Shopaholic",
        }
    }
}

impl fmt::Display for TrophyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TrophyId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrophyId::ALL
            .into_iter()
            .find(|trophy| trophy.key() == s)
            .ok_or(())
    }
}

// Unlock thresholds.
pub const RICH_THRESHOLD: u64 = 5_000;
pub const HIGH_FLYER_ALTITUDE: i32 = 800;
pub const SPENDER_INVENTORY_SIZE: usize = 4;

/// Redeemable codes and the name tag each one grants.
pub const REDEEM_CODES: [(&str, &str); 2] = [
    ("G*b1_BFF", "Kazada com Matheus 🌈"),
    ("PEDRO_DEV", "Pedro gostoso"),
];

pub fn redeem_tag(code: &str) -> Option<&'static str> {
    let code = code.trim();
    REDEEM_CODES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, tag)| *tag)
}
