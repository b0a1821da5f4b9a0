use crate::adapters::JsonEncoder;
use crate::config::toml_config::ToolConfig;
use crate::config::{AddTarget, Command, GetTarget, ModifyArgs, OutputFormat};
use crate::core::fingerprint::{fingerprint, Fingerprint};
use crate::core::operations::ManifestService;
use crate::core::pipeline::modify_document;
use crate::core::uniqueness::validate_name_uniqueness;
use crate::utils::error::{MtaError, Result};
use std::io::Write;
use std::path::Path;

/// What a successfully executed command found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    IssuesFound(usize),
}

pub struct CommandRunner {
    service: ManifestService,
    config: ToolConfig,
}

impl CommandRunner {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            service: ManifestService::local(),
            config,
        }
    }

    /// Executes `command`, writing any query result to `out`.
    pub fn run<W: Write>(&self, command: &Command, out: &mut W) -> Result<Outcome> {
        match command {
            Command::Create { path, data } => {
                tracing::info!(path = %path.display(), "create MTA descriptor");
                // A descriptor that already exists does not match the zero token.
                modify_document(
                    path,
                    || self.service.create_document(path, data),
                    Fingerprint::ZERO,
                    self.config.mutation.enforce_check,
                )?;
                Ok(Outcome::Success)
            }
            Command::Add(AddTarget::Module(args)) => {
                tracing::info!(path = %args.path.display(), "add new module");
                self.modify(args, |service| service.add_module(&args.path, &args.data))
            }
            Command::Add(AddTarget::Resource(args)) => {
                tracing::info!(path = %args.path.display(), "add new resource");
                self.modify(args, |service| service.add_resource(&args.path, &args.data))
            }
            Command::Update(AddTarget::Module(args)) => {
                tracing::info!(path = %args.path.display(), "update module");
                self.modify(args, |service| service.update_module(&args.path, &args.data))
            }
            Command::Update(AddTarget::Resource(args)) => {
                tracing::info!(path = %args.path.display(), "update resource");
                self.modify(args, |service| service.update_resource(&args.path, &args.data))
            }
            Command::Get(GetTarget::Modules { path, format }) => {
                let bytes = match format {
                    OutputFormat::Yaml => self.service.get_modules(path)?,
                    OutputFormat::Json => self.json_service().get_modules(path)?,
                };
                emit(out, &bytes)?;
                Ok(Outcome::Success)
            }
            Command::Get(GetTarget::Resources { path, format }) => {
                let bytes = match format {
                    OutputFormat::Yaml => self.service.get_resources(path)?,
                    OutputFormat::Json => self.json_service().get_resources(path)?,
                };
                emit(out, &bytes)?;
                Ok(Outcome::Success)
            }
            Command::Hash { path } => {
                let (token, exists) = fingerprint(path)?;
                // String, not number: f64-based JSON readers lose digits above 2^53.
                let report = serde_json::json!({ "hashcode": token.to_string(), "exists": exists });
                emit(out, format!("{}\n", report).as_bytes())?;
                Ok(Outcome::Success)
            }
            Command::Copy { source, target } => {
                self.service.copy_file(source, target)?;
                Ok(Outcome::Success)
            }
            Command::Delete { path } => {
                self.service.delete_file(path)?;
                Ok(Outcome::Success)
            }
            Command::Validate { path } => {
                let document = self.service.get_document(path)?;
                let issues = validate_name_uniqueness(&document);
                for issue in &issues {
                    emit(out, format!("{}\n", issue).as_bytes())?;
                }
                if issues.is_empty() {
                    Ok(Outcome::Success)
                } else {
                    Ok(Outcome::IssuesFound(issues.len()))
                }
            }
        }
    }

    fn modify<F>(&self, args: &ModifyArgs, edit: F) -> Result<Outcome>
    where
        F: FnOnce(&ManifestService) -> Result<()>,
    {
        let enforce_check = self.config.mutation.enforce_check && !args.skip_check;
        modify_document(
            &args.path,
            || edit(&self.service),
            args.hashcode,
            enforce_check,
        )?;

        if self.config.validation.check_after_write {
            self.warn_about_collisions(&args.path);
        }
        Ok(Outcome::Success)
    }

    fn warn_about_collisions(&self, path: &Path) {
        match self.service.get_document(path) {
            Ok(document) => {
                for issue in validate_name_uniqueness(&document) {
                    tracing::warn!(path = %path.display(), name = %issue.name, "{}", issue);
                }
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not re-read descriptor"),
        }
    }

    fn json_service(&self) -> ManifestService<crate::adapters::LocalFs, JsonEncoder> {
        self.service.clone().with_encoder(JsonEncoder)
    }
}

fn emit<W: Write>(out: &mut W, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes).map_err(|source| MtaError::WriteError {
        path: "<stdout>".into(),
        source,
    })
}
