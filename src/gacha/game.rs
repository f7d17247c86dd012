use super::error::GameError;
use super::objects::{check_amount, check_rarity, Banner, Item, Player};
use crate::common::*;
use crate::formula::Formula;
use crate::pull::{PullContext, Sampler, WeightTable};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    items: BTreeMap<String, Item>,
    banners: BTreeMap<String, Banner>,
    players: BTreeMap<String, Player>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Odds<'g> {
    pub item: &'g Item,
    pub weight: Float,
    pub probability: Float,
}

#[derive(Serialize)]
struct SavedGame<'g> {
    items: Vec<&'g Item>,
    banners: Vec<&'g Banner>,
    players: Vec<&'g Player>,
}

#[derive(Deserialize)]
struct LoadedGame {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    banners: Vec<Banner>,
    #[serde(default)]
    players: Vec<Player>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    pub fn banner(&self, id: &str) -> Option<&Banner> {
        self.banners.get(id)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn banners(&self) -> impl Iterator<Item = &Banner> {
        self.banners.values()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn find_item_by_name(&self, name: &str) -> Option<&Item> {
        self.items.values().find(|i| i.name() == name)
    }

    pub fn find_banner_by_name(&self, name: &str) -> Option<&Banner> {
        self.banners.values().find(|b| b.name() == name)
    }

    pub fn find_player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.values().find(|p| p.name() == name)
    }

    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        id: impl Into<String>,
        rarity: Rarity,
    ) -> Result<&Item, GameError> {
        self.insert_item(Item::new(name, id, rarity))
    }

    pub fn add_banner(
        &mut self,
        name: impl Into<String>,
        id: impl Into<String>,
        items: Vec<String>,
        price: Float,
        formula: Formula,
    ) -> Result<&Banner, GameError> {
        self.insert_banner(Banner::new(name, id, items, price, formula))
    }

    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        id: impl Into<String>,
        money: Float,
        items: Vec<String>,
    ) -> Result<&Player, GameError> {
        self.insert_player(Player::new(name, id, money, items))
    }

    fn insert_item(&mut self, item: Item) -> Result<&Item, GameError> {
        check_rarity(item.rarity())?;
        if self.items.contains_key(item.id()) {
            return Err(GameError::DuplicateItem(item.id().to_owned()));
        }
        Ok(self.items.entry(item.id().to_owned()).or_insert(item))
    }

    fn insert_banner(&mut self, banner: Banner) -> Result<&Banner, GameError> {
        check_amount(banner.price())?;
        self.check_items_exist(banner.items())?;
        if self.banners.contains_key(banner.id()) {
            return Err(GameError::DuplicateBanner(banner.id().to_owned()));
        }
        Ok(self.banners.entry(banner.id().to_owned()).or_insert(banner))
    }

    fn insert_player(&mut self, player: Player) -> Result<&Player, GameError> {
        check_amount(player.money())?;
        self.check_items_exist(player.items())?;
        if self.players.contains_key(player.id()) {
            return Err(GameError::DuplicatePlayer(player.id().to_owned()));
        }
        Ok(self.players.entry(player.id().to_owned()).or_insert(player))
    }

    fn check_items_exist(&self, ids: &[String]) -> Result<(), GameError> {
        match ids.iter().find(|id| !self.items.contains_key(id.as_str())) {
            Some(id) => Err(GameError::UnknownItem(id.clone())),
            None => Ok(()),
        }
    }

    pub fn add_item_to_banner(&mut self, banner_id: &str, item_id: &str) -> Result<(), GameError> {
        self.check_items_exist(&[item_id.to_owned()])?;
        let banner = self
            .banners
            .get_mut(banner_id)
            .ok_or_else(|| GameError::UnknownBanner(banner_id.to_owned()))?;
        banner.add_item(item_id.to_owned());
        Ok(())
    }

    /// Removes an item from the game, along with every copy of it in banners
    /// and inventories.
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        let item = self.items.remove(id)?;
        for banner in self.banners.values_mut() {
            banner.remove_item(id);
        }
        for player in self.players.values_mut() {
            player.remove_item(id);
        }
        Some(item)
    }

    pub fn remove_banner(&mut self, id: &str) -> Option<Banner> {
        self.banners.remove(id)
    }

    pub fn remove_player(&mut self, id: &str) -> Option<Player> {
        self.players.remove(id)
    }

    pub fn remove_all_banners(&mut self) {
        self.banners.clear();
    }

    fn banner_or_err(&self, id: &str) -> Result<&Banner, GameError> {
        self.banners
            .get(id)
            .ok_or_else(|| GameError::UnknownBanner(id.to_owned()))
    }

    fn banner_items(&self, banner: &Banner) -> Result<Vec<&Item>, GameError> {
        banner
            .items()
            .iter()
            .map(|id| {
                self.items
                    .get(id)
                    .ok_or_else(|| GameError::UnknownItem(id.clone()))
            })
            .collect()
    }

    /// Charges the player the banner's price and hands them one pulled item.
    ///
    /// Either both happen or neither does: a pull that cannot be paid for,
    /// or whose weights cannot be computed, leaves the player untouched.
    pub fn pull<S: Sampler>(
        &mut self,
        player_id: &str,
        banner_id: &str,
        ctx: &mut PullContext<S>,
    ) -> Result<&Item, GameError> {
        let player = self
            .players
            .get(player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_owned()))?;
        let banner = self.banner_or_err(banner_id)?;

        let cost = banner.price();
        if player.money() < cost {
            return Err(GameError::InsufficientFunds {
                player: player_id.to_owned(),
                money: player.money(),
                cost,
            });
        }

        let candidates = self.banner_items(banner)?;
        let item_id = match ctx.pull(banner.formula(), &candidates) {
            Ok(item) => item.id().to_owned(),
            Err(source) => {
                tracing::warn!(banner = banner_id, error = %source, "pull failed");
                return Err(GameError::Pull {
                    banner: banner_id.to_owned(),
                    source,
                });
            }
        };

        let player = self
            .players
            .get_mut(player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_owned()))?;
        player.change_money(-cost)?;
        player.add_item(item_id.clone());
        tracing::info!(player = player_id, banner = banner_id, item = %item_id, "pulled");

        self.items
            .get(&item_id)
            .ok_or(GameError::UnknownItem(item_id))
    }

    pub fn banner_odds(&self, banner_id: &str) -> Result<Vec<Odds<'_>>, GameError> {
        let banner = self.banner_or_err(banner_id)?;
        let items = self.banner_items(banner)?;
        let table = WeightTable::compute(banner.formula(), &items).map_err(|source| {
            GameError::Pull {
                banner: banner_id.to_owned(),
                source,
            }
        })?;

        Ok(items
            .into_iter()
            .zip(table.weights())
            .zip(table.probabilities())
            .map(|((item, &weight), probability)| Odds {
                item,
                weight,
                probability,
            })
            .collect())
    }

    /// Creates a banner of `num_items` items picked at random, with
    /// replacement. Without a `price`, the banner costs the mean rarity of
    /// its items.
    pub fn create_random_banner<R: Rng + ?Sized>(
        &mut self,
        name: impl Into<String>,
        id: impl Into<String>,
        num_items: usize,
        price: Option<Float>,
        formula: Formula,
        rng: &mut R,
    ) -> Result<&Banner, GameError> {
        let pool: Vec<&Item> = self.items.values().collect();
        if pool.is_empty() || num_items == 0 {
            return Err(GameError::EmptyBanner);
        }

        let picked: Vec<&Item> = (0..num_items)
            .filter_map(|_| pool.choose(&mut *rng).copied())
            .collect();
        let price = price.unwrap_or_else(|| {
            picked.iter().map(|i| i.rarity()).sum::<Float>() / picked.len() as Float
        });
        let ids = picked.iter().map(|i| i.id().to_owned()).collect();

        self.add_banner(name, id, ids, price, formula)
    }

    pub fn net_worth(&self, player_id: &str) -> Option<Float> {
        self.players.get(player_id).map(|p| self.worth_of(p))
    }

    fn worth_of(&self, player: &Player) -> Float {
        player
            .items()
            .iter()
            .filter_map(|id| self.items.get(id))
            .map(Item::rarity)
            .sum()
    }

    pub fn top_items(&self, n: usize) -> Vec<&Item> {
        let mut items: Vec<_> = self.items.values().collect();
        items.sort_by(|a, b| b.rarity().total_cmp(&a.rarity()));
        items.truncate(n);
        items
    }

    pub fn top_players(&self, n: usize) -> Vec<&Player> {
        let mut players: Vec<_> = self
            .players
            .values()
            .map(|p| (self.worth_of(p), p))
            .collect();
        players.sort_by(|a, b| b.0.total_cmp(&a.0));
        players.into_iter().take(n).map(|(_, p)| p).collect()
    }

    /// Entities are checked the same way as when they are added one by one.
    pub fn from_json(s: &str) -> Result<Self, GameError> {
        let loaded: LoadedGame = serde_json::from_str(s)?;
        let mut game = Self::new();
        for item in loaded.items {
            game.insert_item(item)?;
        }
        for banner in loaded.banners {
            game.insert_banner(banner)?;
        }
        for player in loaded.players {
            game.insert_player(player)?;
        }
        tracing::debug!(
            items = game.items.len(),
            banners = game.banners.len(),
            players = game.players.len(),
            "loaded game"
        );
        Ok(game)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        let saved = SavedGame {
            items: self.items.values().collect(),
            banners: self.banners.values().collect(),
            players: self.players.values().collect(),
        };
        Ok(serde_json::to_string_pretty(&saved)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json(&s)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
