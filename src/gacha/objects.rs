use super::error::GameError;
use crate::common::*;
use crate::formula::Formula;
use crate::pull::Candidate;
use serde::{Deserialize, Serialize};

pub(crate) fn check_rarity(rarity: Rarity) -> Result<(), GameError> {
    if rarity.is_finite() && rarity > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidRarity(rarity))
    }
}

pub(crate) fn check_amount(amount: Float) -> Result<(), GameError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidAmount(amount))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    id: String,
    rarity: Rarity,
}

impl Item {
    pub fn new(name: impl Into<String>, id: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            rarity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn set_rarity(&mut self, rarity: Rarity) -> Result<(), GameError> {
        check_rarity(rarity)?;
        self.rarity = rarity;
        Ok(())
    }
}

impl Candidate for Item {
    fn rarity(&self) -> Rarity {
        self.rarity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    name: String,
    id: String,
    items: Vec<String>,
    price: Float,
    #[serde(default)]
    formula: Formula,
}

impl Banner {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        items: Vec<String>,
        price: Float,
        formula: Formula,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            items,
            price,
            formula,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Item ids in the order they are weighed.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn price(&self) -> Float {
        self.price
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub(crate) fn add_item(&mut self, id: String) {
        self.items.push(id);
    }

    pub(crate) fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != id);
        self.items.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    id: String,
    money: Float,
    #[serde(default)]
    items: Vec<String>,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        money: Float,
        items: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            money,
            items,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn money(&self) -> Float {
        self.money
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Fails without changing anything if the balance would leave `[0, inf)`.
    pub fn change_money(&mut self, amount: Float) -> Result<(), GameError> {
        if !amount.is_finite() {
            return Err(GameError::InvalidAmount(amount));
        }
        let money = self.money + amount;
        if money < 0.0 {
            return Err(GameError::InsufficientFunds {
                player: self.id.clone(),
                money: self.money,
                cost: -amount,
            });
        }
        check_amount(money)?;
        self.money = money;
        Ok(())
    }

    pub(crate) fn add_item(&mut self, id: String) {
        self.items.push(id);
    }

    pub(crate) fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != id);
        self.items.len() != before
    }
}
