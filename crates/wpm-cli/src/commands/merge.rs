//! Merge command
//!
//! Usage:
//!   wpm merge --lang <LANG> --policy <POLICY> --old <VALUE> --new <VALUE>
//!   wpm merge --lang <LANG> --config <FILE> --kind <KIND> --field <FIELD> --old <VALUE> --new <VALUE>
//!
//! With `--policy` the edit is merged directly. With `--config` it goes
//! through the full write pipeline, as the host would run it.

use super::input::{print_json, read_json};
use super::CommandResult;
use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;
use wpm_core::{
    decode, encode, merge, EngineConfig, FlatValue, Policy, ProjectionRegistry, StaticLanguages,
    WriteInterceptor,
};
use wpm_core_types::{LangCode, SlotId, SlotKind};

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Language the edit was made in
    #[arg(long)]
    pub lang: LangCode,

    /// Policy in config-file shape (JSON, @file or -)
    #[arg(long, conflicts_with = "config", required_unless_present = "config")]
    pub policy: Option<String>,

    /// Engine config file (.toml or .json)
    #[arg(long, requires_all = ["kind", "field"])]
    pub config: Option<PathBuf>,

    /// Slot kind, resolved against the config
    #[arg(long)]
    pub kind: Option<SlotKind>,

    /// Field name, resolved against the config
    #[arg(long)]
    pub field: Option<String>,

    /// Stored value (JSON, @file or -)
    #[arg(long, default_value = "null")]
    pub old: String,

    /// Submitted value (JSON, @file or -)
    #[arg(long)]
    pub new: String,

    /// Print the merged tree instead of the encoded value
    #[arg(long)]
    pub tree: bool,
}

pub fn execute(args: MergeArgs) -> CommandResult {
    let old = read_json(&args.old)?;
    let new = read_json(&args.new)?;

    match (&args.policy, &args.config) {
        (Some(policy), _) => {
            let policy = Policy::from_config_value(&read_json(policy)?)?;
            let merged = merge(&decode(&old), &new, &args.lang, &policy);
            if args.tree {
                print_json(&serde_json::to_value(&merged)?)
            } else {
                print_json(&encode(&merged))
            }
        }
        (None, Some(path)) => {
            let (Some(kind), Some(field)) = (args.kind, args.field.as_deref()) else {
                return Err("--config requires --kind and --field".into());
            };
            let config = EngineConfig::load(path)?;
            let slot = SlotId::new(kind, None, field);
            let value = run_pipeline(&config, &slot, args.lang, old, new)?;
            if args.tree {
                print_json(&serde_json::to_value(decode(&value))?)
            } else {
                print_json(&value)
            }
        }
        (None, None) => Err("either --policy or --config is required".into()),
    }
}

fn run_pipeline(
    config: &EngineConfig,
    slot: &SlotId,
    lang: LangCode,
    old: FlatValue,
    new: FlatValue,
) -> Result<FlatValue, Box<dyn std::error::Error>> {
    let mut store = HashMap::new();
    store.insert(slot.clone(), old);
    let languages = StaticLanguages::new(lang, config.language_set());
    let policies = config.policy_registry();
    let projection = ProjectionRegistry::new();
    projection.register(slot)?;

    let interceptor = WriteInterceptor::new(&store, &languages, &policies, &projection);
    Ok(interceptor.intercept_write(slot, new)?)
}
