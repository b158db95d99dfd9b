// Player progression: wallet, inventory, equipped items and trophies.

use crate::domain::catalog::{
    self, DEFAULT_PLANE_ID, DEFAULT_SKIN_ID, HIGH_FLYER_ALTITUDE, ItemKind, RICH_THRESHOLD,
    SPENDER_INVENTORY_SIZE, STARTING_INVENTORY, TURBO_ITEM_ID, TrophyId,
};
use crate::domain::tuning::flight::FlightTuning;
use std::collections::BTreeSet;

pub const DEFAULT_NAME_TAG: &str = "Pilot";

/// Persisted subset of [`ProgressionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveData {
    pub money: u64,
    pub inventory: Vec<String>,
    pub trophies: Vec<String>,
    pub missions_completed: u32,
    pub player_name_tag: String,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            money: 0,
            inventory: STARTING_INVENTORY.iter().map(|id| id.to_string()).collect(),
            trophies: Vec::new(),
            missions_completed: 0,
            player_name_tag: DEFAULT_NAME_TAG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Bought,
    /// Already owned; skins and planes get equipped again.
    AlreadyOwned,
    InsufficientFunds,
    UnknownItem,
}

impl PurchaseOutcome {
    pub fn succeeded(self) -> bool {
        matches!(self, PurchaseOutcome::Bought | PurchaseOutcome::AlreadyOwned)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionState {
    pub money: u64,
    pub inventory: BTreeSet<String>,
    pub equipped_skin: String,
    pub equipped_plane: String,
    pub trophies: BTreeSet<TrophyId>,
    pub missions_completed: u32,
    pub name_tag: String,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            money: 0,
            inventory: STARTING_INVENTORY.iter().map(|id| id.to_string()).collect(),
            equipped_skin: DEFAULT_SKIN_ID.to_string(),
            equipped_plane: DEFAULT_PLANE_ID.to_string(),
            trophies: BTreeSet::new(),
            missions_completed: 0,
            name_tag: DEFAULT_NAME_TAG.to_string(),
        }
    }
}

impl ProgressionState {
    pub fn owns(&self, item_id: &str) -> bool {
        self.inventory.contains(item_id)
    }

    pub fn has_turbo(&self) -> bool {
        self.owns(TURBO_ITEM_ID)
    }

    pub fn max_air_speed(&self, tuning: &FlightTuning) -> f32 {
        tuning.max_air_speed(self.has_turbo())
    }

    /// Buys or re-equips a catalog item. Failures leave the state untouched.
    pub fn purchase(&mut self, item_id: &str) -> PurchaseOutcome {
        let Some(item) = catalog::find_item(item_id) else {
            return PurchaseOutcome::UnknownItem;
        };

        if self.owns(item.id) {
            self.equip(item.id, item.kind);
            return PurchaseOutcome::AlreadyOwned;
        }

        if self.money < item.price {
            return PurchaseOutcome::InsufficientFunds;
        }

        self.money -= item.price;
        self.inventory.insert(item.id.to_string());
        // Skins are worn immediately; planes wait for an explicit re-buy.
        if item.kind == ItemKind::Skin {
            self.equipped_skin = item.id.to_string();
        }
        self.evaluate_trophies(None);
        PurchaseOutcome::Bought
    }

    /// Boolean form used by menus.
    pub fn buy_item(&mut self, item_id: &str) -> bool {
        self.purchase(item_id).succeeded()
    }

    fn equip(&mut self, item_id: &str, kind: ItemKind) {
        match kind {
            ItemKind::Skin => self.equipped_skin = item_id.to_string(),
            ItemKind::Plane => self.equipped_plane = item_id.to_string(),
            _ => {}
        }
    }

    pub fn add_money(&mut self, amount: u64) -> Vec<TrophyId> {
        self.money = self.money.saturating_add(amount);
        self.evaluate_trophies(None)
    }

    /// Books a finished delivery and returns trophies it unlocked.
    pub fn complete_mission(&mut self, reward: u64) -> Vec<TrophyId> {
        self.missions_completed = self.missions_completed.saturating_add(1);
        self.add_money(reward)
    }

    /// Unlocks every trophy whose condition now holds. Trophies are never
    /// removed. `altitude` is the current HUD altitude when flying.
    pub fn evaluate_trophies(&mut self, altitude: Option<i32>) -> Vec<TrophyId> {
        let mut unlocked = Vec::new();
        for trophy in TrophyId::ALL {
            if self.trophies.contains(&trophy) {
                continue;
            }
            let earned = match trophy {
                TrophyId::FirstFlight => self.missions_completed >= 1,
                TrophyId::Rich => self.money >= RICH_THRESHOLD,
                TrophyId::HighFlyer => altitude.is_some_and(|alt| alt >= HIGH_FLYER_ALTITUDE),
                TrophyId::Spender => self.inventory.len() > SPENDER_INVENTORY_SIZE,
            };
            if earned {
                self.trophies.insert(trophy);
                unlocked.push(trophy);
            }
        }
        unlocked
    }

    /// Applies a redeem code. Returns the granted name tag on success.
    pub fn redeem_code(&mut self, code: &str) -> Option<&'static str> {
        let tag = catalog::redeem_tag(code)?;
        self.name_tag = tag.to_string();
        Some(tag)
    }

    pub fn to_save(&self) -> SaveData {
        SaveData {
            money: self.money,
            inventory: self.inventory.iter().cloned().collect(),
            trophies: self.trophies.iter().map(|t| t.key().to_string()).collect(),
            missions_completed: self.missions_completed,
            player_name_tag: self.name_tag.clone(),
        }
    }

    /// Replaces persisted fields with loaded ones. Equipped items are kept
    /// when still owned. Unknown trophy ids are dropped.
    pub fn apply_save(&mut self, save: SaveData) {
        self.money = save.money;
        self.inventory = save.inventory.into_iter().collect();
        if self.inventory.is_empty() {
            self.inventory = STARTING_INVENTORY.iter().map(|id| id.to_string()).collect();
        }
        self.trophies = save
            .trophies
            .iter()
            .filter_map(|key| key.parse().ok())
            .collect();
        self.missions_completed = save.missions_completed;
        self.name_tag = if save.player_name_tag.is_empty() {
            DEFAULT_NAME_TAG.to_string()
        } else {
            save.player_name_tag
        };

        if !self.owns(&self.equipped_skin) {
            self.equipped_skin = DEFAULT_SKIN_ID.to_string();
        }
        if !self.owns(&self.equipped_plane) {
            self.equipped_plane = DEFAULT_PLANE_ID.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_money(money: u64) -> ProgressionState {
        ProgressionState {
            money,
            ..ProgressionState::default()
        }
    }

    #[test]
    fn when_funds_are_one_short_then_turbo_purchase_fails_without_mutation() {
        let mut store = with_money(1_999);
        let before = store.clone();

        assert!(!store.buy_item("engine_turbo"));
        assert_eq!(store, before);
    }

    #[test]
    fn when_funds_are_exact_then_turbo_is_bought_and_raises_top_speed() {
        let mut store = with_money(2_000);
        let tuning = FlightTuning::default();

        assert!(store.buy_item("engine_turbo"));
        assert_eq!(store.money, 0);
        assert!(store.owns("engine_turbo"));
        assert_eq!(store.max_air_speed(&tuning), 3.5);
    }

    #[test]
    fn when_item_is_owned_then_purchase_succeeds_without_charge() {
        let mut store = with_money(10_000);
        assert_eq!(store.purchase("skin_gold"), PurchaseOutcome::Bought);
        let after_first = store.money;

        assert_eq!(store.purchase("skin_gold"), PurchaseOutcome::AlreadyOwned);
        assert_eq!(store.money, after_first);
        assert_eq!(store.inventory.iter().filter(|id| *id == "skin_gold").count(), 1);
    }

    #[test]
    fn when_owned_skin_is_rebought_then_it_is_equipped_again() {
        let mut store = with_money(5_000);
        store.purchase("skin_gold");
        store.purchase("skin_stealth");
        assert_eq!(store.equipped_skin, "skin_stealth");

        store.purchase("skin_gold");
        assert_eq!(store.equipped_skin, "skin_gold");
    }

    #[test]
    fn when_item_is_unknown_then_purchase_fails() {
        let mut store = with_money(100_000);
        assert_eq!(store.purchase("hyperdrive"), PurchaseOutcome::UnknownItem);
        assert_eq!(store.money, 100_000);
    }

    #[test]
    fn trophies_are_monotonic_and_reported_once() {
        let mut store = ProgressionState::default();
        assert_eq!(store.add_money(5_000), vec![TrophyId::Rich]);
        assert!(store.add_money(1).is_empty());

        // Spending below the threshold keeps the trophy.
        assert!(store.buy_item("nitro_boost"));
        assert!(store.trophies.contains(&TrophyId::Rich));
        assert!(store.trophies.contains(&TrophyId::Spender));
    }

    #[test]
    fn altitude_trophy_needs_flight_context() {
        let mut store = ProgressionState::default();
        assert!(store.evaluate_trophies(None).is_empty());
        assert!(store.evaluate_trophies(Some(799)).is_empty());
        assert_eq!(store.evaluate_trophies(Some(800)), vec![TrophyId::HighFlyer]);
    }

    #[test]
    fn completing_a_mission_unlocks_first_flight() {
        let mut store = ProgressionState::default();
        let unlocked = store.complete_mission(500);
        assert_eq!(store.money, 500);
        assert_eq!(store.missions_completed, 1);
        assert_eq!(unlocked, vec![TrophyId::FirstFlight]);
    }

    #[test]
    fn redeem_code_sets_name_tag_only_on_match() {
        let mut store = ProgressionState::default();
        assert_eq!(store.redeem_code("nope"), None);
        assert_eq!(store.name_tag, "Pilot");

        assert_eq!(store.redeem_code(" G*b1_BFF "), Some("Kazada com Matheus 🌈"));
        assert_eq!(store.name_tag, "Kazada com Matheus 🌈");
    }

    #[test]
    fn save_round_trip_keeps_progress_and_drops_unknown_trophies() {
        let mut store = with_money(3_000);
        store.buy_item("skin_gold");
        store.complete_mission(100);

        let mut save = store.to_save();
        save.trophies.push("moon_landing".to_string());

        let mut restored = ProgressionState::default();
        restored.apply_save(save);
        assert_eq!(restored.money, store.money);
        assert_eq!(restored.inventory, store.inventory);
        assert_eq!(restored.trophies, store.trophies);
        assert_eq!(restored.missions_completed, 1);
    }

    #[test]
    fn empty_save_falls_back_to_starting_inventory() {
        let mut restored = ProgressionState::default();
        restored.apply_save(SaveData {
            inventory: Vec::new(),
            player_name_tag: String::new(),
            ..SaveData::default()
        });
        assert_eq!(restored.inventory.len(), STARTING_INVENTORY.len());
        assert_eq!(restored.name_tag, "Pilot");
    }
}
