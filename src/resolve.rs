use crate::data::{RecipeBook, RecipeError};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde_derive::Serialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Recipe(#[from] RecipeError),
    #[error("demand for {item} must be non-negative, got {required}")]
    NegativeDemand { item: String, required: Decimal },
    #[error("batch count for {item} does not fit in 64 bits")]
    BatchOverflow { item: String },
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct Resolution {
    pub materials: HashMap<String, Decimal>,
    pub crafts: HashMap<String, u64>,
}

impl Resolution {
    pub fn merge(&mut self, other: Resolution) {
        for (name, amount) in other.materials {
            *self.materials.entry(name).or_insert(Decimal::ZERO) += amount;
        }
        for (name, batches) in other.crafts {
            *self.crafts.entry(name).or_insert(0) += batches;
        }
    }
}

/// Walks the ingredient tree of `target` and accumulates the raw materials
/// and craft batches needed to produce `required` units.
///
/// Batch counts round up independently at every demand site and are then
/// summed, so a recipe demanded along several paths can end up with more
/// batches than a single rounding over the pooled demand would give. Raw
/// material totals inherit the rounded batch counts and overshoot the
/// fractional minimum the same way.
pub fn resolve(
    book: &RecipeBook,
    target: &str,
    required: Decimal,
) -> Result<Resolution, ResolveError> {
    if required < Decimal::ZERO {
        return Err(ResolveError::NegativeDemand {
            item: target.to_owned(),
            required,
        });
    }
    let mut resolution = Resolution::default();
    if !required.is_zero() {
        process(book, target, required, &mut resolution)?;
    }
    Ok(resolution)
}

fn process(
    book: &RecipeBook,
    item: &str,
    required: Decimal,
    resolution: &mut Resolution,
) -> Result<(), ResolveError> {
    let Some(recipe) = book.get(item) else {
        // No recipe means the whole demand lands on the raw material
        *resolution
            .materials
            .entry(item.to_owned())
            .or_insert(Decimal::ZERO) += required;
        return Ok(());
    };
    if recipe.output <= Decimal::ZERO {
        return Err(RecipeError::InvalidOutput {
            key: recipe.key.clone(),
            output: recipe.output,
        }
        .into());
    }
    let batches = (required / recipe.output).ceil();
    let count = batches.to_u64().ok_or_else(|| ResolveError::BatchOverflow {
        item: recipe.key.clone(),
    })?;
    *resolution.crafts.entry(recipe.key.clone()).or_insert(0) += count;
    for ingredient in &recipe.ingredients {
        process(book, &ingredient.name, ingredient.amount * batches, resolution)?;
    }
    Ok(())
}
