//! Codec commands
//!
//! Usage:
//!   wpm detect <VALUE>
//!   wpm decode <VALUE>
//!   wpm encode <TREE>

use super::input::{print_json, read_json};
use super::CommandResult;
use clap::Args;
use serde_json::Value;
use wpm_core::{decode, encode, is_multilingual, MlValue};

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Flat value (JSON, @file or -)
    pub value: String,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Flat value (JSON, @file or -)
    pub value: String,
}

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Multilingual tree as printed by `wpm decode` (JSON, @file or -)
    pub tree: String,
}

pub fn execute_detect(args: DetectArgs) -> CommandResult {
    let flat = read_json(&args.value)?;
    print_json(&Value::Bool(is_multilingual(&flat)))
}

pub fn execute_decode(args: DecodeArgs) -> CommandResult {
    let flat = read_json(&args.value)?;
    let tree = decode(&flat);
    print_json(&serde_json::to_value(&tree)?)
}

pub fn execute_encode(args: EncodeArgs) -> CommandResult {
    let tree: MlValue = serde_json::from_value(read_json(&args.tree)?)
        .map_err(|e| format!("Invalid tree: {}", e))?;
    print_json(&encode(&tree))
}
