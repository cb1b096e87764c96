use data::{Recipe, RecipeBook};
use rust_decimal::Decimal;

pub mod data;
pub mod graph;
pub mod render;
pub mod resolve;

pub fn get_recipe<'a>(book: &'a RecipeBook, name: &str) -> Result<&'a Recipe, String> {
    if let Some(recipe) = book.get(name) {
        return Ok(recipe);
    }
    let lower = name.to_lowercase();
    let mut similar: Vec<_> = book
        .recipes
        .keys()
        .filter(|k| k.to_lowercase().contains(&lower))
        .collect();
    if !similar.is_empty() {
        similar.sort();
        eprintln!("{name} was not found. Similar items:");
        for k in similar {
            eprintln!("{k}");
        }
    }
    Err(format!("{name} was not found"))
}

pub fn round_string(d: Decimal) -> String {
    d.round_dp(3).to_string()
}
