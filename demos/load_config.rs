//! Loading a configuration file and reading it through dotted paths.
//!
//! Run with: cargo run --example load_config

use fiptoml::load;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/config.toml");
    let doc = load(path)?;

    println!("{} v{}", doc.get_str("title")?, doc.get_integer("version")?);
    println!("started at {}", doc.get_datetime("started")?);

    let host = doc.get_str("server.host")?;
    let port = doc.get_integer("server.port")?;
    println!("listening on {}:{}", host, port);

    // Missing keys fall back to a default
    let backlog = doc.get_or("server.backlog", 128i64);
    println!("backlog: {}", backlog);

    let pool = doc.get_as::<&[i64]>("database.pool")?;
    println!("pool size: {}..{}", pool[0], pool[1]);

    if doc.get_or("log.file.rotate", false) {
        println!("rotating {}", doc.get_str("log.file.path")?);
    }

    for upstream in doc.get_array_of_tables("upstream")? {
        let endpoints = upstream.get_as::<&[String]>("endpoints")?;
        println!("{} -> {}", upstream.get_str("name")?, endpoints.join(", "));
    }

    // Lookup failures say what went wrong
    if let Err(e) = doc.get_integer("server.host") {
        println!("expected error: {}", e);
    }

    Ok(())
}
