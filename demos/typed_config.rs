//! Decoding straight into serde types.
//!
//! Run with: cargo run --example typed_config

use chrono::{DateTime, FixedOffset};
use fiptoml::from_str;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Server {
    host: String,
    port: u16,
    #[serde(default)]
    workers: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Level {
    Debug,
    Info,
    Warn,
}

#[derive(Debug, Deserialize)]
struct Upstream {
    name: String,
    endpoints: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Config {
    title: String,
    started: DateTime<FixedOffset>,
    level: Level,
    server: Server,
    #[serde(default)]
    upstream: Vec<Upstream>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = from_str(
        r#"title = "inventory service"
started = 2024-03-01T09:30:00+01:00
level = "info"

[server]
host = "0.0.0.0"
port = 8080

[[upstream]]
name = "pricing"
endpoints = [ "10.0.0.11:9000", "10.0.0.12:9000" ]
"#,
    )?;

    println!("{:#?}", config);

    // Out-of-range values are reported by serde
    let err = from_str::<Server>("host = \"x\"\nport = 70000\n").unwrap_err();
    println!("expected error: {}", err);

    Ok(())
}
