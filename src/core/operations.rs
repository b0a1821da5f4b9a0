use crate::adapters::{LocalFs, YamlEncoder};
use crate::core::document;
use crate::domain::model::{Document, Module, Resource};
use crate::domain::ports::{Encoder, FileSystem};
use crate::utils::error::{MtaError, Result};
use std::path::Path;

/// Typed operations on a manifest file.
///
/// Every mutation loads the whole document, changes it in memory and
/// rewrites the file in full. The file system and the encoder are injected;
/// the encoder decides the format of manifests written and of query results.
#[derive(Debug, Clone, Default)]
pub struct ManifestService<F: FileSystem = LocalFs, E: Encoder = YamlEncoder> {
    fs: F,
    encoder: E,
}

impl ManifestService {
    pub fn local() -> Self {
        Self::default()
    }
}

impl<F: FileSystem, E: Encoder> ManifestService<F, E> {
    pub fn new(fs: F, encoder: E) -> Self {
        Self { fs, encoder }
    }

    /// Same file system, different output encoder.
    pub fn with_encoder<E2: Encoder>(self, encoder: E2) -> ManifestService<F, E2> {
        ManifestService {
            fs: self.fs,
            encoder,
        }
    }

    /// Writes a new manifest described by `json` to `path`.
    pub fn create_document(&self, path: &Path, json: &str) -> Result<()> {
        let document = Document::from_json(json)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs
                .create_dir_all(parent)
                .map_err(|source| MtaError::WriteError {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        self.store(path, &document)?;
        tracing::info!(path = %path.display(), id = %document.id, "created MTA descriptor");
        Ok(())
    }

    pub fn add_module(&self, path: &Path, json: &str) -> Result<()> {
        let mut document = self.load(path)?;
        let module = Module::from_json(json)?;
        tracing::debug!(path = %path.display(), module = %module.name, "adding module");
        document.modules.push(module);
        self.store(path, &document)
    }

    pub fn add_resource(&self, path: &Path, json: &str) -> Result<()> {
        let mut document = self.load(path)?;
        let resource = Resource::from_json(json)?;
        tracing::debug!(path = %path.display(), resource = %resource.name, "adding resource");
        document.resources.push(resource);
        self.store(path, &document)
    }

    /// Replaces the module with the fragment's name, keeping its position.
    pub fn update_module(&self, path: &Path, json: &str) -> Result<()> {
        let mut document = self.load(path)?;
        let module = Module::from_json(json)?;
        let slot = document
            .modules
            .iter_mut()
            .find(|m| m.name == module.name)
            .ok_or_else(|| MtaError::EntityNotFoundError {
                kind: "module".to_string(),
                name: module.name.clone(),
            })?;
        *slot = module;
        self.store(path, &document)
    }

    /// Replaces the resource with the fragment's name, keeping its position.
    pub fn update_resource(&self, path: &Path, json: &str) -> Result<()> {
        let mut document = self.load(path)?;
        let resource = Resource::from_json(json)?;
        let slot = document
            .resources
            .iter_mut()
            .find(|r| r.name == resource.name)
            .ok_or_else(|| MtaError::EntityNotFoundError {
                kind: "resource".to_string(),
                name: resource.name.clone(),
            })?;
        *slot = resource;
        self.store(path, &document)
    }

    pub fn get_document(&self, path: &Path) -> Result<Document> {
        self.load(path)
    }

    /// Encodes only the module sequence of the manifest at `path`.
    pub fn get_modules(&self, path: &Path) -> Result<Vec<u8>> {
        let document = self.load(path)?;
        self.encoder.encode(&document.modules)
    }

    /// Encodes only the resource sequence of the manifest at `path`.
    pub fn get_resources(&self, path: &Path) -> Result<Vec<u8>> {
        let document = self.load(path)?;
        self.encoder.encode(&document.resources)
    }

    /// Copies `src` to `dst`. A failed copy leaves no file at `dst`.
    pub fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        let data = self
            .fs
            .read(src)
            .map_err(|source| MtaError::from_read(src, source))?;
        self.fs
            .write_atomic(dst, &data)
            .map_err(|source| MtaError::WriteError {
                path: dst.to_path_buf(),
                source,
            })?;
        tracing::debug!(src = %src.display(), dst = %dst.display(), bytes = data.len(), "copied file");
        Ok(())
    }

    pub fn delete_file(&self, path: &Path) -> Result<()> {
        self.fs.remove_file(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                MtaError::FileNotFoundError {
                    path: path.to_path_buf(),
                }
            } else {
                MtaError::WriteError {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        tracing::debug!(path = %path.display(), "deleted file");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Document> {
        let bytes = self
            .fs
            .read(path)
            .map_err(|source| MtaError::from_read(path, source))?;
        document::deserialize_from(&path.display().to_string(), &bytes)
    }

    fn store(&self, path: &Path, document: &Document) -> Result<()> {
        let bytes = self.encoder.encode(document)?;
        self.fs
            .write_atomic(path, &bytes)
            .map_err(|source| MtaError::WriteError {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use std::io;
    use tempfile::TempDir;

    const ROOT_JSON: &str =
        r#"{"id":"test","version":"1.2","schemaVersion":"1.1","description":"test mta creation"}"#;

    /// Local disk, but directory creation and writes can be made to fail.
    #[derive(Default)]
    struct FlakyFs {
        fail_mkdir: bool,
        fail_write: bool,
    }

    impl FileSystem for FlakyFs {
        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            LocalFs.read(path)
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            if self.fail_mkdir {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "mkdir refused"));
            }
            LocalFs.create_dir_all(path)
        }

        fn write_atomic(&self, path: &Path, data: &[u8]) -> io::Result<()> {
            if self.fail_write {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "create refused"));
            }
            LocalFs.write_atomic(path, data)
        }

        fn remove_file(&self, path: &Path) -> io::Result<()> {
            LocalFs.remove_file(path)
        }
    }

    struct FailingEncoder;

    impl Encoder for FailingEncoder {
        fn encode<T: Serialize + ?Sized>(&self, _value: &T) -> Result<Vec<u8>> {
            Err(MtaError::SerializationError {
                message: "encoder refused".to_string(),
            })
        }
    }

    #[test]
    fn test_create_document_fails_when_directory_cannot_be_made() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("result").join("mta.yaml");
        let service = ManifestService::new(
            FlakyFs {
                fail_mkdir: true,
                ..Default::default()
            },
            YamlEncoder,
        );

        let err = service.create_document(&path, ROOT_JSON).unwrap_err();
        assert!(matches!(err, MtaError::WriteError { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_copy_failure_leaves_no_target() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("mta.yaml");
        let dst = temp_dir.path().join("copy.yaml");
        ManifestService::local().create_document(&src, ROOT_JSON).unwrap();

        let service = ManifestService::new(
            FlakyFs {
                fail_write: true,
                ..Default::default()
            },
            YamlEncoder,
        );
        assert!(service.copy_file(&src, &dst).is_err());
        assert!(!dst.exists());
    }

    #[test]
    fn test_add_module_fails_to_serialize_and_keeps_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mta.yaml");
        ManifestService::local().create_document(&path, ROOT_JSON).unwrap();
        let before = std::fs::read(&path).unwrap();

        let service = ManifestService::new(LocalFs, FailingEncoder);
        let err = service
            .add_module(&path, r#"{"name":"testModule","type":"testType","path":"test"}"#)
            .unwrap_err();
        assert!(matches!(err, MtaError::SerializationError { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), before);

        let err = service
            .add_resource(&path, r#"{"name":"testResource","type":"testType"}"#)
            .unwrap_err();
        assert!(matches!(err, MtaError::SerializationError { .. }));
    }

    #[test]
    fn test_update_module_replaces_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mta.yaml");
        let service = ManifestService::local();
        service.create_document(&path, ROOT_JSON).unwrap();
        service.add_module(&path, r#"{"name":"a","type":"nodejs"}"#).unwrap();
        service.add_module(&path, r#"{"name":"b","type":"java"}"#).unwrap();

        service
            .update_module(&path, r#"{"name":"a","type":"python","path":"py"}"#)
            .unwrap();

        let document = service.get_document(&path).unwrap();
        let names: Vec<&str> = document.modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(document.modules[0].r#type, "python");
        assert_eq!(document.modules[0].path, "py");
    }

    #[test]
    fn test_update_missing_entity_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mta.yaml");
        let service = ManifestService::local();
        service.create_document(&path, ROOT_JSON).unwrap();

        let err = service
            .update_resource(&path, r#"{"name":"ghost","type":"t"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            MtaError::EntityNotFoundError { ref kind, ref name } if kind == "resource" && name == "ghost"
        ));
    }

    #[test]
    fn test_delete_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = ManifestService::local()
            .delete_file(&temp_dir.path().join("mta.yaml"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
