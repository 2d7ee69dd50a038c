use anyhow::Result;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// CsvConnection owns the data directory and knows where each file lives
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {:?}", base_path);
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn pools_directory(&self) -> PathBuf {
        self.base_directory.join("pools")
    }

    pub fn pool_directory(&self, pool_id: u64) -> PathBuf {
        self.pools_directory().join(pool_id.to_string())
    }

    pub fn pool_file_path(&self, pool_id: u64) -> PathBuf {
        self.pool_directory(pool_id).join("pool.yaml")
    }

    pub fn bids_file_path(&self, pool_id: u64) -> PathBuf {
        self.pool_directory(pool_id).join("bids.csv")
    }

    /// Write `contents` to a sibling temp file, then rename over `path`
    pub fn write_atomically(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;

        debug!("Wrote {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("data");
        let connection = CsvConnection::new(&base).unwrap();
        assert!(base.exists());
        assert_eq!(connection.base_directory(), base.as_path());
    }

    #[test]
    fn test_pool_paths() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        assert_eq!(
            connection.pool_file_path(7),
            temp_dir.path().join("pools").join("7").join("pool.yaml")
        );
        assert_eq!(
            connection.bids_file_path(7),
            temp_dir.path().join("pools").join("7").join("bids.csv")
        );
    }

    #[test]
    fn test_write_atomically_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let path = connection.pool_file_path(1);

        connection.write_atomically(&path, b"first").unwrap();
        connection.write_atomically(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
    }
}
