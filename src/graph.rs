use crate::{
    data::{RecipeBook, RecipeError},
    resolve::ResolveError,
};
use petgraph::{graph::NodeIndex, stable_graph::StableGraph};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::fmt::Display;

pub type GraphType = StableGraph<Node, Edge>;

/// Expansion tree of one or more demands, one node per demand site. The
/// same item appears once for every path that demands it, mirroring how
/// batch counts are accumulated.
pub struct DemandGraph<'a> {
    pub graph: GraphType,
    pub book: &'a RecipeBook,
    pub roots: Vec<NodeIndex>,
}

impl<'a> DemandGraph<'a> {
    pub fn new(book: &'a RecipeBook) -> DemandGraph<'a> {
        DemandGraph {
            graph: GraphType::new(),
            book,
            roots: Vec::new(),
        }
    }

    pub fn add(&mut self, required: Decimal, name: &str) -> Result<(), ResolveError> {
        if required < Decimal::ZERO {
            return Err(ResolveError::NegativeDemand {
                item: name.to_owned(),
                required,
            });
        }
        let root = self.build_node(name, required)?;
        self.roots.push(root);
        Ok(())
    }

    fn build_node(&mut self, item: &str, required: Decimal) -> Result<NodeIndex, ResolveError> {
        let book = self.book;
        let Some(recipe) = book.get(item) else {
            return Ok(self.graph.add_node(Node {
                name: item.to_owned(),
                required,
                batches: None,
            }));
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
        let node = self.graph.add_node(Node {
            name: recipe.key.clone(),
            required,
            batches: Some(count),
        });
        for ingredient in &recipe.ingredients {
            let edge = Edge {
                required: ingredient.amount * batches,
                item: ingredient.name.clone(),
            };
            let child = self.build_node(&ingredient.name, edge.required)?;
            self.graph.add_edge(node, child, edge);
        }
        Ok(node)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub name: String,
    pub required: Decimal,
    pub batches: Option<u64>,
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", crate::round_string(self.required), self.name)?;
        if let Some(batches) = self.batches {
            write!(f, " ({batches})")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub required: Decimal,
    pub item: String,
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", crate::round_string(self.required), self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{build_book, RawData};

    fn workshop() -> RecipeBook {
        let raw: RawData = serde_json::from_str(
            r#"{ "recipes": {
                "ironBar": { "output": 6, "ingredients": { "ironOre": 25, "coal": 25 } },
                "nails": { "output": 6, "ingredients": { "ironBar": 1, "coal": 1 } },
                "copperBar": { "output": 2, "ingredients": { "copperOre": 5, "coal": 2 } },
                "transferBoxes": {
                    "output": 1,
                    "ingredients": { "copperBar": 1, "nails": 5, "softwood": 2 }
                }
            } }"#,
        )
        .unwrap();
        build_book(raw).unwrap()
    }

    #[test]
    fn one_node_per_demand_site() {
        let book = workshop();
        let mut graph = DemandGraph::new(&book);
        graph.add(Decimal::from(5), "transferBoxes").unwrap();
        // transferBoxes, copperBar (+2 raws), nails (+coal),
        // ironBar (+2 raws), softwood; coal shows up three times
        assert_eq!(graph.graph.node_count(), 10);
        assert_eq!(graph.graph.edge_count(), 9);
        assert_eq!(graph.roots.len(), 1);
        let root = &graph.graph[graph.roots[0]];
        assert_eq!(root.name, "transferBoxes");
        assert_eq!(root.batches, Some(5));
    }

    #[test]
    fn raw_material_node_has_no_batches() {
        let book = workshop();
        let mut graph = DemandGraph::new(&book);
        graph.add(Decimal::from(7), "softwood").unwrap();
        let root = &graph.graph[graph.roots[0]];
        assert_eq!(root.batches, None);
        assert_eq!(root.to_string(), "7 softwood");
    }

    #[test]
    fn craft_node_displays_batch_count() {
        let book = workshop();
        let mut graph = DemandGraph::new(&book);
        graph.add(Decimal::from(10), "ironBar").unwrap();
        let root = &graph.graph[graph.roots[0]];
        assert_eq!(root.to_string(), "10 ironBar (2)");
    }
}
