use crate::core::table::RateTable;
use crate::store::StoreError;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Reads one storage file. A missing file is `Ok(None)`.
pub async fn read_table(path: &Path) -> Result<Option<RateTable>, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Rates file not present");
            return Ok(None);
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let table = RateTable::from_json(&bytes).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bases = table.len(), "Read rates file");
    Ok(Some(table))
}

/// Writes `table` pretty-printed to a sibling temp file, then renames it over `path`.
pub async fn write_table(path: &Path, table: &RateTable) -> Result<(), StoreError> {
    let bytes = table.to_json_pretty()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, &bytes)
        .await
        .map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), bases = table.len(), "Wrote rates file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("valid_rates.json");
        std::fs::write(
            &path,
            r#"{
                "USD": {"EUR": 0.92, "GBP": 0.78},
                "EUR": {"USD": 1.09}
            }"#,
        )
        .unwrap();

        let table = read_table(&path).await.unwrap().unwrap();
        assert_eq!(table.rate("USD", "EUR"), Some(0.92));
        assert_eq!(table.rate("EUR", "USD"), Some(1.09));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_table(&dir.path().join("absent.json")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_wrong_leaf_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_rates.json");
        std::fs::write(&path, r#"{"USD": {"EUR": "oops"}}"#).unwrap();

        let err = read_table(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_write_then_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved_rates.json");
        let table = RateTable::from([("USD", [("EUR", 0.92)]), ("EUR", [("USD", 1.09)])]);

        write_table(&path, &table).await.unwrap();

        let read_back = read_table(&path).await.unwrap().unwrap();
        assert_eq!(read_back, table);
        // No temp file left behind
        assert!(!dir.path().join("saved_rates.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved_rates.json");

        write_table(&path, &RateTable::from([("USD", [("EUR", 0.92)])]))
            .await
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("  \"USD\": {"));
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("saved.json");

        write_table(&path, &RateTable::from([("USD", [("EUR", 0.92)])]))
            .await
            .unwrap();

        assert!(path.exists());
    }
}
