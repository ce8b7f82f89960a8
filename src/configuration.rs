use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn password(&self) -> String;
    fn port(&self) -> String;
    fn storage_path(&self) -> Option<PathBuf>;
    fn storage_key(&self) -> String;
}
