use chrono::{DateTime, FixedOffset};
use fiptoml::{from_document, from_slice, from_str, parse_str, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Deserialize, Serialize, Debug, PartialEq)]
struct Owner {
    name: String,
    dob: DateTime<FixedOffset>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
struct Database {
    server: String,
    ports: Vec<u16>,
    connection_max: u32,
    enabled: bool,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
struct Product {
    #[serde(default)]
    name: String,
    #[serde(default)]
    sku: u64,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
struct Config {
    title: String,
    owner: Owner,
    database: Database,
    products: Vec<Product>,
}

const CONFIG: &str = r#"title = "TOML Example"

[owner]
name = "Lance Uppercut"
dob = 1979-05-27T07:32:00-08:00

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[[products]]
name = "Hammer"
sku = 738594937

[[products]]

[[products]]
name = "Nail"
sku = 284758393
"#;

#[test]
fn test_deserialize_config() {
    let config: Config = from_str(CONFIG).unwrap();
    assert_eq!(config.title, "TOML Example");
    assert_eq!(config.owner.name, "Lance Uppercut");
    assert_eq!(
        config.owner.dob,
        DateTime::parse_from_rfc3339("1979-05-27T07:32:00-08:00").unwrap()
    );
    assert_eq!(config.database.ports, vec![8001, 8001, 8002]);
    assert_eq!(config.database.timeout_ms, None);
    assert_eq!(config.products.len(), 3);
    assert_eq!(config.products[1], Product { name: String::new(), sku: 0 });

    let from_bytes: Config = from_slice(CONFIG.as_bytes()).unwrap();
    assert_eq!(from_bytes, config);
}

#[test]
fn test_deserialize_borrowed_from_document() {
    #[derive(Deserialize)]
    struct Names<'a> {
        title: &'a str,
        #[serde(borrow)]
        owner: HashMap<&'a str, &'a str>,
    }

    let doc = parse_str("title = \"t\"\n\n[owner]\nname = \"n\"\nrole = \"r\"\n").unwrap();
    let names: Names = from_document(&doc).unwrap();
    assert_eq!(names.title, "t");
    assert_eq!(names.owner["role"], "r");
}

#[test]
fn test_deserialize_enums() {
    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Level {
        Debug,
        Info,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Backend {
        Memory,
        Disk { path: String, size: u64 },
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Logging {
        level: Level,
        backend: Backend,
        fallback: Backend,
    }

    let logging: Logging = from_str(
        "level = \"info\"\nfallback = \"Memory\"\n\n[backend.Disk]\npath = \"/var/log\"\nsize = 10\n",
    )
    .unwrap();
    assert_eq!(
        logging,
        Logging {
            level: Level::Info,
            backend: Backend::Disk {
                path: "/var/log".to_string(),
                size: 10,
            },
            fallback: Backend::Memory,
        }
    );

    assert!(from_str::<Logging>("level = \"trace\"\n").is_err());
}

#[test]
fn test_deserialize_errors() {
    #[derive(Deserialize, Debug)]
    struct Port {
        #[allow(dead_code)]
        port: u16,
    }

    assert!(matches!(from_str::<Port>("port = \"80\"\n"), Err(Error::Custom(_))));
    assert!(matches!(from_str::<Port>("port = 70000\n"), Err(Error::Custom(_))));
    assert!(matches!(from_str::<Port>("other = 1\n"), Err(Error::Custom(_))));
    // decode errors pass through unchanged
    assert_eq!(
        from_str::<Port>("port = 80\nport = 81\n").unwrap_err(),
        Error::DuplicateKey("port".to_string())
    );
}

#[test]
fn test_json_export_of_decoded_document() {
    let doc = parse_str(CONFIG).unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["owner"]["dob"], "1979-05-27T07:32:00-08:00");
    assert_eq!(json["database"]["ports"], serde_json::json!([8001, 8001, 8002]));
    assert_eq!(json["products"][1], serde_json::json!({}));

    // and back into the typed config through JSON
    let config: Config = serde_json::from_value(json).unwrap();
    assert_eq!(config, from_str::<Config>(CONFIG).unwrap());
}
