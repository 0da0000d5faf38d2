//! Inspecting a decoded tree without knowing its shape up front.
//!
//! Run with: cargo run --example dynamic_values

use fiptoml::{parse_str, Document, Kind, Node};
use std::error::Error;

fn walk(doc: &Document, prefix: &str) {
    for (key, node) in doc {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match node {
            Node::Table(table) => walk(table, &path),
            Node::ArrayOfTables(docs) => {
                for (i, table) in docs.iter().enumerate() {
                    walk(table, &format!("{}[{}]", path, i));
                }
            }
            Node::Array(array) => {
                let kind = array.kind().map_or("empty".to_string(), |k| k.to_string());
                println!("{} = {} ({} array)", path, node, kind);
            }
            _ => println!("{} = {} ({})", path, node, node.kind()),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = parse_str(
        r#"
name = "demo"
ratio = 0.5

[features]
enabled = [ "auth", "logging" ]
disabled = []

[[jobs]]
id = 1

[[jobs]]
id = 2
retry = true
"#,
    )?;

    walk(&doc, "");

    // Count values by kind
    let integers = doc
        .get_array_of_tables("jobs")?
        .iter()
        .filter(|job| job.get("id").map(Node::kind) == Some(Kind::Integer))
        .count();
    println!("jobs with integer ids: {}", integers);

    // Build on top of a decoded tree
    doc.insert("debug".to_string(), Node::from(true));
    println!("\nwith debug:\n{}", fiptoml::to_string(&doc));

    // Any serde format can carry the tree
    println!("as JSON: {}", serde_json::to_string(&doc)?);

    Ok(())
}
