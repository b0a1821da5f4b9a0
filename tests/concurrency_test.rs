use fs2::FileExt;
use mta_tool::core::lock::lock_path_for;
use mta_tool::{fingerprint, modify_document, ManifestLock, ManifestService, MtaError};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Barrier};
use tempfile::TempDir;

const ROOT_JSON: &str = r#"{"ID":"app","version":"1.0.0","description":"concurrency"}"#;

fn create(path: &Path) -> ManifestService {
    let service = ManifestService::local();
    service.create_document(path, ROOT_JSON).unwrap();
    service
}

#[test]
fn test_stale_hashcode_is_rejected_and_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mta.yaml");
    let service = create(&path);

    let (hash, exists) = fingerprint(&path).unwrap();
    assert!(exists);

    modify_document(
        &path,
        || service.add_module(&path, r#"{"name":"testModule","type":"testType","path":"test"}"#),
        hash,
        true,
    )
    .unwrap();
    let after_first = std::fs::read(&path).unwrap();

    let err = modify_document(
        &path,
        || service.add_module(&path, r#"{"name":"test1","type":"testType","path":"test"}"#),
        hash,
        true,
    )
    .unwrap_err();

    assert!(matches!(err, MtaError::ConcurrentModificationError { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), after_first);
    assert_eq!(service.get_document(&path).unwrap().modules.len(), 1);
}

#[test]
fn test_locking_fails_while_sentinel_is_held() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mta.yaml");
    let service = create(&path);
    let (hash, _) = fingerprint(&path).unwrap();
    let before = std::fs::read(&path).unwrap();

    let holder = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path_for(&path))
        .unwrap();
    FileExt::try_lock_exclusive(&holder).unwrap();

    let add = || service.add_module(&path, r#"{"name":"testModule","type":"testType"}"#);
    let err = modify_document(&path, add, hash, true).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(r#"failed to lock the "{}" file for modification"#, path.display())
    );
    assert_eq!(std::fs::read(&path).unwrap(), before);

    FileExt::unlock(&holder).unwrap();
    drop(holder);

    modify_document(&path, add, hash, true).unwrap();
    assert_eq!(service.get_document(&path).unwrap().modules.len(), 1);
}

#[test]
fn test_held_lock_blocks_other_thread() {
    let temp_dir = TempDir::new().unwrap();
    let path = Arc::new(temp_dir.path().join("mta.yaml"));
    create(&path);
    let (hash, _) = fingerprint(&path).unwrap();

    let lock = ManifestLock::acquire(&path).unwrap();

    let contender = {
        let path = Arc::clone(&path);
        std::thread::spawn(move || {
            let service = ManifestService::local();
            modify_document(
                &path,
                || service.add_resource(&path, r#"{"name":"db","type":"hana"}"#),
                hash,
                true,
            )
        })
    };
    let err = contender.join().unwrap().unwrap_err();
    assert!(matches!(err, MtaError::LockHeldError { .. }));

    lock.release();
    let service = ManifestService::local();
    modify_document(
        &path,
        || service.add_resource(&path, r#"{"name":"db","type":"hana"}"#),
        hash,
        true,
    )
    .unwrap();
}

#[test]
fn test_racing_writers_with_same_hashcode_apply_once() {
    let temp_dir = TempDir::new().unwrap();
    let path = Arc::new(temp_dir.path().join("mta.yaml"));
    create(&path);
    let (hash, _) = fingerprint(&path).unwrap();

    let writers = 4;
    let barrier = Arc::new(Barrier::new(writers));
    let handles: Vec<_> = (0..writers)
        .map(|i| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                let service = ManifestService::local();
                barrier.wait();
                modify_document(
                    &path,
                    || service.add_module(&path, &format!(r#"{{"name":"m{}","type":"nodejs"}}"#, i)),
                    hash,
                    true,
                )
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let applied = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(applied, 1);
    assert!(results.iter().all(|r| match r {
        Ok(()) => true,
        Err(e) => matches!(
            e,
            MtaError::LockHeldError { .. } | MtaError::ConcurrentModificationError { .. }
        ),
    }));

    let document = ManifestService::local().get_document(&path).unwrap();
    assert_eq!(document.modules.len(), 1);
}
