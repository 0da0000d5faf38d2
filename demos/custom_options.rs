//! Shaping written output with WriteOptions.
//!
//! Run with: cargo run --example custom_options

use fiptoml::{parse_str, to_string, to_string_with_options, WriteOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse_str(
        "zone = \"eu\"\nhosts = [\"a\", \"b\"]\n\n[limits]\nrate = 100\nburst = 20\n",
    )?;

    // Default format (compact arrays, insertion order)
    println!("Default:");
    println!("{}", to_string(&doc));

    // Spaced arrays and indented table bodies
    println!("Pretty:");
    println!("{}", to_string_with_options(&doc, WriteOptions::pretty()));

    // Stable output for diffs
    println!("Sorted, indent 4:");
    let options = WriteOptions::pretty().with_indent(4).with_sorted_keys(true);
    let sorted = to_string_with_options(&doc, options);
    println!("{}", sorted);

    // Every layout decodes to the same document
    assert_eq!(parse_str(&sorted)?, doc);
    println!("✓ Round-trip successful");

    Ok(())
}
