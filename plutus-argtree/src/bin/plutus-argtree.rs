/// CLI: reads a contract blueprint from a file or stdin and prints either
/// the editable argument tree of one validator slot or its default value.
///
/// Usage:
///   plutus-argtree plutus.json
///   plutus-argtree --validator vault.spend --slot datum --tree plutus.json
///   RUST_LOG=debug plutus-argtree < plutus.json
use anyhow::{anyhow, Context};
use clap::Parser;
use plutus_argtree::{ArgNode, Blueprint, BuildOptions, PlutusData, Slot};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plutus-argtree", version)]
struct Cli {
    /// blueprint file (stdin if omitted)
    blueprint: Option<PathBuf>,

    /// validator title (first validator if omitted)
    #[arg(long, short)]
    validator: Option<String>,

    /// datum, redeemer, or parameters
    #[arg(long, short, default_value = "redeemer")]
    slot: Slot,

    /// print the editable tree instead of its default value
    #[arg(long)]
    tree: bool,

    /// maximum schema nesting before the build is abandoned
    #[arg(long, default_value_t = plutus_argtree::builder::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn load(path: Option<&PathBuf>) -> anyhow::Result<Blueprint> {
    match path {
        Some(path) => {
            Blueprint::from_path(path).with_context(|| format!("cannot load {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            Blueprint::from_json(&buf).context("invalid blueprint")
        }
    }
}

/// The requested validator, or the first one the blueprint lists.
fn choose_validator(blueprint: &Blueprint, requested: Option<&str>) -> anyhow::Result<String> {
    match requested {
        Some(title) => Ok(title.to_string()),
        None => blueprint
            .validators
            .first()
            .map(|v| v.title.clone())
            .ok_or_else(|| anyhow!("blueprint has no validators")),
    }
}

/// `--tree` prints the trees themselves. Otherwise datum and redeemer print
/// one value and parameters print a list.
fn render(trees: &[ArgNode], slot: Slot, tree: bool) -> anyhow::Result<String> {
    if tree {
        return Ok(serde_json::to_string_pretty(trees)?);
    }
    let values = trees
        .iter()
        .map(ArgNode::to_plutus_val)
        .collect::<Result<Vec<PlutusData>, _>>()
        .with_context(|| format!("cannot serialize {slot}"))?;
    let text = match slot {
        Slot::Parameters => serde_json::to_string_pretty(&values)?,
        Slot::Datum | Slot::Redeemer => {
            let value = values
                .first()
                .ok_or_else(|| anyhow!("no {slot} to serialize"))?;
            serde_json::to_string_pretty(value)?
        }
    };
    Ok(text)
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let blueprint = load(cli.blueprint.as_ref())?;
    let title = choose_validator(&blueprint, cli.validator.as_deref())?;
    log::info!("building {} for validator '{title}'", cli.slot);

    let options = BuildOptions {
        max_depth: cli.max_depth,
    };
    let trees = blueprint
        .slot_args(&title, cli.slot, options)
        .with_context(|| format!("cannot build {}", cli.slot))?;
    render(&trees, cli.slot, cli.tree)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    }
}
