use core::fmt::{self, Display};
use rust_decimal::Decimal;
use serde_derive::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct RawData {
    pub recipes: HashMap<String, RawRecipe>,
}

#[derive(Debug, Deserialize)]
pub struct RawRecipe {
    pub output: Decimal,
    #[serde(default)]
    pub ingredients: HashMap<String, Decimal>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeError {
    #[error("recipe {key} must produce a positive amount per batch, got {output}")]
    InvalidOutput { key: String, output: Decimal },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub key: String,
    pub output: Decimal,
    pub ingredients: Vec<IngredientAmount>,
}

impl Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "recipe - {} {}: {} / batch",
            crate::round_string(self.output),
            self.key,
            self.ingredients
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IngredientAmount {
    pub amount: Decimal,
    pub name: String,
}

impl Display for IngredientAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", crate::round_string(self.amount), self.name)
    }
}

#[derive(Debug)]
pub struct RecipeBook {
    pub recipes: HashMap<String, Recipe>,
}

impl RecipeBook {
    /// A key absent from the book is a raw material, not an error.
    pub fn get(&self, key: &str) -> Option<&Recipe> {
        self.recipes.get(key)
    }

    pub fn recipes(&self) -> impl Iterator<Item = (&String, &Recipe)> {
        self.recipes.iter()
    }
}

pub fn build_book(data: RawData) -> Result<RecipeBook, RecipeError> {
    let mut recipes = HashMap::new();
    for (key, raw) in data.recipes {
        if raw.output <= Decimal::ZERO {
            return Err(RecipeError::InvalidOutput {
                key,
                output: raw.output,
            });
        }
        let mut ingredients: Vec<_> = raw
            .ingredients
            .into_iter()
            .map(|(name, amount)| IngredientAmount { amount, name })
            .collect();
        // Stable ingredient order keeps expansion and rendering deterministic
        ingredients.sort_by(|a, b| a.name.cmp(&b.name));
        recipes.insert(
            key.clone(),
            Recipe {
                key,
                output: raw.output,
                ingredients,
            },
        );
    }
    Ok(RecipeBook { recipes })
}
