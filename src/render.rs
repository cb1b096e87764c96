use crate::graph::DemandGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences, IntoNodeReferences, NodeIndexable, NodeRef};
use std::fmt::Write;

static INDENT: &str = "    ";

pub fn render(demand: &DemandGraph) -> Result<String, Box<dyn std::error::Error>> {
    let g = &demand.graph;
    let mut f = String::new();
    writeln!(f, "digraph {{")?;
    writeln!(f, "{INDENT}newrank=true")?;
    for node in g.node_references() {
        if node.weight().batches.is_some() {
            writeln!(
                f,
                "{INDENT}{} [label = \"{}\" shape=record]",
                g.to_index(node.id()),
                node.weight()
            )?;
        } else {
            writeln!(
                f,
                "{INDENT}{} [label = \"{}\"]",
                g.to_index(node.id()),
                node.weight()
            )?;
        }
    }
    for edge in g.edge_references() {
        writeln!(
            f,
            "{INDENT}{} -> {} [label = \"{}\" dir=back]",
            g.to_index(edge.source()),
            g.to_index(edge.target()),
            edge.weight()
        )?;
    }
    writeln!(f, "}}")?;
    Ok(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{build_book, RawData};
    use rust_decimal::Decimal;

    #[test]
    fn renders_nodes_and_demand_edges() {
        let raw: RawData = serde_json::from_str(
            r#"{ "recipes": {
                "ironBar": { "output": 6, "ingredients": { "ironOre": 25, "coal": 25 } }
            } }"#,
        )
        .unwrap();
        let book = build_book(raw).unwrap();
        let mut graph = DemandGraph::new(&book);
        graph.add(Decimal::from(10), "ironBar").unwrap();
        let dot = render(&graph).unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("[label = \"10 ironBar (2)\" shape=record]"));
        assert!(dot.contains("[label = \"50 ironOre\"]"));
        assert!(dot.contains("dir=back"));
        assert!(dot.trim_end().ends_with('}'));
    }
}
