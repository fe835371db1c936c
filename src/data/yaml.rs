//! YAML processing utilities

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use yaml_rust_davvid::YamlEmitter;

/// Serialize data structure to YAML string with multi-line strings kept as
/// literal blocks
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let serde_value = serde_yaml::to_value(data).context("Failed to serialize to serde value")?;
    let yaml_rust_value = convert_serde_to_yaml_rust(&serde_value);

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter
        .dump(&yaml_rust_value)
        .context("Failed to emit YAML")?;

    Ok(output)
}

/// Convert serde_yaml::Value to yaml_rust_davvid::Yaml
fn convert_serde_to_yaml_rust(value: &serde_yaml::Value) -> yaml_rust_davvid::Yaml {
    use yaml_rust_davvid::Yaml;

    match value {
        serde_yaml::Value::Null => Yaml::Null,
        serde_yaml::Value::Bool(b) => Yaml::Boolean(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Yaml::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Yaml::Real(f.to_string())
            } else {
                Yaml::String(n.to_string())
            }
        }
        serde_yaml::Value::String(s) => Yaml::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => {
            Yaml::Array(seq.iter().map(convert_serde_to_yaml_rust).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut yaml_map = yaml_rust_davvid::yaml::Hash::new();
            for (k, v) in map {
                yaml_map.insert(convert_serde_to_yaml_rust(k), convert_serde_to_yaml_rust(v));
            }
            Yaml::Hash(yaml_map)
        }
        serde_yaml::Value::Tagged(tagged) => convert_serde_to_yaml_rust(&tagged.value),
    }
}

/// Deserialize YAML string to data structure
pub fn from_yaml<T: for<'de> Deserialize<'de>>(yaml: &str) -> Result<T> {
    serde_yaml::from_str(yaml).context("Failed to deserialize YAML")
}

/// Read and parse YAML file
pub fn read_yaml_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file: {}", path.as_ref().display()))?;

    from_yaml(&content)
}
