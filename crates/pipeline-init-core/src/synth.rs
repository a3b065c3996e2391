//! Config synthesis: look up the resolved document, inject the
//! collected environment assignments, hand it back for emission.

use crate::detector::ConfigMap;
use crate::error::{InitError, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One environment variable binding collected during a walk.
///
/// Serialized as a single-entry map (`- ENV_KEY: value`), the shape the
/// pipeline-config environment block uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignment {
    pub key: String,
    pub value: String,
}

impl EnvAssignment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Serialize for EnvAssignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for EnvAssignment {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct EnvVisitor;

        impl<'de> Visitor<'de> for EnvVisitor {
            type Value = EnvAssignment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a single-entry map of ENV_KEY to value")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let (key, value) = access
                    .next_entry::<String, String>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if access.next_entry::<String, String>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(EnvAssignment { key, value })
            }
        }

        deserializer.deserialize_map(EnvVisitor)
    }
}

/// The application-level section of a pipeline-config document. Only
/// the environment block is typed; everything else passes through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvAssignment>,

    #[serde(flatten)]
    pub rest: serde_yaml::Mapping,
}

/// A pipeline-config document, parsed just enough to reach its
/// application-level environment block. No semantic validation happens
/// here or anywhere in this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub app: AppSection,

    #[serde(flatten)]
    pub rest: serde_yaml::Mapping,
}

/// Look up the resolved document text by `config_name`, parse it, and
/// replace its environment block wholesale with `assignments`.
pub fn synthesize(
    config_name: &str,
    configs: &ConfigMap,
    assignments: &[EnvAssignment],
) -> Result<ConfigDocument> {
    let text = configs
        .get(config_name)
        .ok_or_else(|| InitError::MissingDocument(config_name.to_string()))?;

    let mut document: ConfigDocument = serde_yaml::from_str(text)?;
    document.app.envs = assignments.to_vec();

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::ConfigMap;

    const DOCUMENT: &str = "\
format_version: \"1\"
app:
  title: Sample app
  envs:
  - STALE_KEY: stale value
pipelines:
  primary:
    steps: []
";

    fn configs() -> ConfigMap {
        let mut configs = ConfigMap::new();
        configs.insert("android-debug".to_string(), DOCUMENT.to_string());
        configs
    }

    #[test]
    fn test_synthesize_replaces_envs_wholesale() {
        let assignments = vec![
            EnvAssignment::new("PROJECT_PATH", "./app"),
            EnvAssignment::new("VARIANT", "debug"),
        ];

        let document = synthesize("android-debug", &configs(), &assignments).unwrap();
        assert_eq!(document.app.envs, assignments);

        // Everything outside the env block is untouched.
        let yaml = serde_yaml::to_string(&document).unwrap();
        assert!(yaml.contains("title: Sample app"));
        assert!(yaml.contains("format_version: '1'"));
        assert!(yaml.contains("PROJECT_PATH: ./app"));
        assert!(!yaml.contains("STALE_KEY"));
    }

    #[test]
    fn test_synthesize_clears_envs_when_nothing_collected() {
        let document = synthesize("android-debug", &configs(), &[]).unwrap();
        assert!(document.app.envs.is_empty());
    }

    #[test]
    fn test_unknown_config_name_is_missing_document() {
        let err = synthesize("ios-app", &configs(), &[]).unwrap_err();
        assert!(matches!(err, InitError::MissingDocument(name) if name == "ios-app"));
    }

    #[test]
    fn test_unparsable_document_is_parse_failure() {
        let mut configs = ConfigMap::new();
        configs.insert("broken".to_string(), "app: [unclosed".to_string());

        let err = synthesize("broken", &configs, &[]).unwrap_err();
        assert!(matches!(err, InitError::ParseFailure(_)));
    }

    #[test]
    fn test_env_assignment_wire_shape() {
        let item = EnvAssignment::new("PROJECT_PATH", "./app");
        assert_eq!(serde_yaml::to_string(&item).unwrap(), "PROJECT_PATH: ./app\n");

        let parsed: EnvAssignment = serde_yaml::from_str("VARIANT: release\n").unwrap();
        assert_eq!(parsed, EnvAssignment::new("VARIANT", "release"));

        assert!(serde_yaml::from_str::<EnvAssignment>("A: b\nC: d\n").is_err());
    }
}
