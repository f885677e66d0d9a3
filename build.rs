use std::fs;

/// Keys the bundled config must define, by section
const REQUIRED: &[(&str, &[&str])] = &[
    ("toc", &["selector", "expandable_class", "expand_delay_ms"]),
    (
        "content",
        &["main_selector", "code_header_class", "alert_class", "table_wrapper_class"],
    ),
    ("notebook", &["prose_marker", "code_marker"]),
    ("export", &["origin_prefix", "extension"]),
    ("browser", &["headless", "navigation_timeout_secs"]),
];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // Every field Config::compiled_default relies on must be present
    for (section, keys) in REQUIRED {
        let Some(values) = table.get(*section).and_then(|v| v.as_table()) else {
            panic!("default_config.toml is missing the [{}] section", section);
        };
        for key in *keys {
            if !values.contains_key(*key) {
                panic!("default_config.toml is missing {}.{}", section, key);
            }
        }
    }
}
