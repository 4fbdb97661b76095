use crate::models::ReporterIdentity;
use std::io::{Error, ErrorKind};
use std::path::Path;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

/// Loads the reporter identity, creating and persisting a fresh one the first
/// time. An existing file that cannot be read or parsed is an error rather
/// than a reason to mint a new identity.
pub async fn load_or_create_identity(path: &Path) -> Result<ReporterIdentity, Error> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
            Error::new(
                ErrorKind::InvalidData,
                format!("failed to parse identity file {}: {err}", path.display()),
            )
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let identity = ReporterIdentity {
                reporter_id: Uuid::new_v4().to_string(),
            };
            persist_identity(path, &identity).await?;
            info!("new reporter id created: {}", identity.reporter_id);
            Ok(identity)
        }
        Err(err) => Err(err),
    }
}

pub async fn persist_identity(path: &Path, identity: &ReporterIdentity) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(identity).map_err(Error::other)?;
    fs::write(path, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unique_identity_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("topside_identity_{tag}_{}_{nanos}", std::process::id()));
        path.push("identity.json");
        path
    }

    #[tokio::test]
    async fn identity_is_created_once_and_reused() {
        let path = unique_identity_path("reuse");

        let first = load_or_create_identity(&path).await.unwrap();
        assert!(Uuid::parse_str(&first.reporter_id).is_ok());
        assert!(path.exists());

        let second = load_or_create_identity(&path).await.unwrap();
        assert_eq!(first, second);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn corrupt_identity_file_is_an_error() {
        let path = unique_identity_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not json").unwrap();

        let err = load_or_create_identity(&path).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(std::fs::read(&path).unwrap(), b"not json");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
