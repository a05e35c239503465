//! JSON argument handling
//!
//! Every value argument is JSON text, `@path` to read it from a file, or
//! `-` to read it from stdin.

use serde_json::Value;
use std::io::Read;

pub fn read_json(arg: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let text = if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else if let Some(path) = arg.strip_prefix('@') {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path, e))?
    } else {
        arg.to_string()
    };

    let value = serde_json::from_str(&text).map_err(|e| format!("Invalid JSON: {}", e))?;
    Ok(value)
}

pub fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
