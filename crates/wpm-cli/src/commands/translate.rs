//! Translate command
//!
//! Usage: wpm translate --lang <LANG> [--default <LANG>] <VALUE>

use super::input::{print_json, read_json};
use super::CommandResult;
use clap::Args;
use wpm_core::{translate_value, Fallback};
use wpm_core_types::LangCode;

#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Language to project to
    #[arg(long)]
    pub lang: LangCode,

    /// Language used when `--lang` has no text (default: empty string)
    #[arg(long)]
    pub default: Option<LangCode>,

    /// Flat value (JSON, @file or -)
    pub value: String,
}

pub fn execute(args: TranslateArgs) -> CommandResult {
    let flat = read_json(&args.value)?;
    let fallback = match args.default {
        Some(lang) => Fallback::Language(lang),
        None => Fallback::Empty,
    };
    print_json(&translate_value(&flat, &args.lang, &fallback))
}
