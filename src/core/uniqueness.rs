use crate::domain::model::Document;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Kind of entity that claims a name in the manifest's global namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Module,
    ProvidedService,
    Resource,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Module => "module",
            EntityKind::ProvidedService => "provided service",
            EntityKind::Resource => "resource",
        };
        f.write_str(label)
    }
}

/// A non-fatal finding about a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub name: String,
    pub kind: EntityKind,
    pub previous_kind: EntityKind,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Reports every name shared by modules, provided services and resources.
///
/// Names are claimed in document order: each module followed by its provided
/// services, then the resources. A repeated name is reported against the kind
/// that claimed it first.
pub fn validate_name_uniqueness(document: &Document) -> Vec<ValidationIssue> {
    let mut names: HashMap<&str, EntityKind> = HashMap::new();
    let mut issues = Vec::new();

    for module in &document.modules {
        claim(&mut names, &module.name, EntityKind::Module, &mut issues);
        for provided in &module.provides {
            claim(&mut names, &provided.name, EntityKind::ProvidedService, &mut issues);
        }
    }
    for resource in &document.resources {
        claim(&mut names, &resource.name, EntityKind::Resource, &mut issues);
    }

    issues
}

fn claim<'a>(
    names: &mut HashMap<&'a str, EntityKind>,
    name: &'a str,
    kind: EntityKind,
    issues: &mut Vec<ValidationIssue>,
) {
    match names.get(name) {
        Some(&previous_kind) => issues.push(ValidationIssue {
            name: name.to_string(),
            kind,
            previous_kind,
            message: format!(
                r#"the "{}" {} name is not unique; a {} was found with the same name"#,
                name, kind, previous_kind
            ),
        }),
        None => {
            names.insert(name, kind);
        }
    }
}
