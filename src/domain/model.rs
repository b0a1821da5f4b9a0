use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form key/value bag (`properties`, `parameters`, unknown keys).
pub type PropertyMap = BTreeMap<String, serde_yaml::Value>;

/// Root of an MTA deployment descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Document {
    #[serde(rename = "ID", alias = "id")]
    pub id: String,

    /// `None` and `Some("")` are different states and both survive a rewrite.
    #[serde(
        rename = "_schema-version",
        alias = "schema-version",
        alias = "schemaVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_version: Option<String>,

    pub version: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Module>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: PropertyMap,

    /// Top-level keys this model does not know about, kept as-is.
    #[serde(flatten)]
    pub extensions: PropertyMap,
}

impl Document {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            schema_version: None,
            version: version.into(),
            description: String::new(),
            modules: Vec::new(),
            resources: Vec::new(),
            parameters: PropertyMap::new(),
            extensions: PropertyMap::new(),
        }
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Module {
    pub name: String,

    #[serde(rename = "type")]
    pub r#type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<ProvidedService>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<RequiredDependency>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: PropertyMap,

    /// Keys this model does not name, such as `build-parameters` or `public`.
    #[serde(flatten)]
    pub extensions: PropertyMap,
}

impl Module {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
            path: String::new(),
            provides: Vec::new(),
            requires: Vec::new(),
            properties: PropertyMap::new(),
            parameters: PropertyMap::new(),
            extensions: PropertyMap::new(),
        }
    }
}

/// A `provides` entry of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProvidedService {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,

    #[serde(flatten)]
    pub extensions: PropertyMap,
}

impl ProvidedService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: PropertyMap::new(),
            extensions: PropertyMap::new(),
        }
    }
}

/// A `requires` entry; references a name declared elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RequiredDependency {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: PropertyMap,

    #[serde(flatten)]
    pub extensions: PropertyMap,
}

impl RequiredDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: PropertyMap::new(),
            parameters: PropertyMap::new(),
            extensions: PropertyMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Resource {
    pub name: String,

    #[serde(rename = "type")]
    pub r#type: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: PropertyMap,

    #[serde(flatten)]
    pub extensions: PropertyMap,
}

impl Resource {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
            properties: PropertyMap::new(),
            parameters: PropertyMap::new(),
            extensions: PropertyMap::new(),
        }
    }
}
