use clap::Parser;
use demanda::{
    data::{self, RawData},
    graph::DemandGraph,
    render,
    resolve::{self, Resolution},
};
use serde_json::Value;
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[command()]
struct Args {
    /// Item to produce, optionally followed by a desired quantity
    #[arg(short, long, num_args = 1..=2)]
    items: Vec<Vec<String>>,
    /// Recipe table JSON; defaults to the built-in workshop set
    #[arg(long)]
    recipes: Option<PathBuf>,
    #[arg(long)]
    total: bool,
    #[arg(long)]
    render: bool,
    #[arg(long)]
    out: bool,
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let b = match &args.recipes {
        Some(path) => fs::read(path)?,
        None => include_bytes!("workshop.json").to_vec(),
    };
    if args.debug {
        let data: Value = serde_json::from_slice(&b)?;
        println!(
            "{:?}",
            data["recipes"]
                .get(args.items[0][0].as_str())
                .ok_or(format!("{} was not found", args.items[0][0]))?
        );
        return Ok(());
    }
    let raw: RawData = serde_json::from_slice(&b)?;
    let book = data::build_book(raw)?;
    let mut resolution = Resolution::default();
    let mut graph = DemandGraph::new(&book);
    for item in &args.items {
        let mut iter = item.iter();
        let name = iter.next().unwrap();
        let required = if let Some(quantity) = iter.next() {
            quantity.parse()?
        } else {
            let recipe = demanda::get_recipe(&book, name)?;
            eprintln!(
                "Using {} for {name} (1 batch)",
                demanda::round_string(recipe.output)
            );
            recipe.output
        };
        resolution.merge(resolve::resolve(&book, name, required)?);
        if args.render {
            graph.add(required, name)?;
        }
    }
    if args.render {
        print!("{}", render::render(&graph)?);
    }
    if args.total {
        let mut materials: Vec<_> = resolution.materials.iter().collect();
        materials.sort_by(|a, b| a.0.cmp(b.0));
        for (name, required) in materials {
            println!("{} {name}", demanda::round_string(*required));
        }
        let mut crafts: Vec<_> = resolution.crafts.iter().collect();
        crafts.sort_by(|a, b| a.0.cmp(b.0));
        for (name, batches) in crafts {
            println!("{name} x {batches}");
        }
    }
    if args.out {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    }
    Ok(())
}
