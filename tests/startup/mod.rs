mod connect_to_database;
mod initialize;

use std::path::PathBuf;

/// SQLite file in the temp directory, removed when dropped
pub struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "authentcare-{}-{}.db",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        Self { path }
    }

    pub fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path.display())
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
