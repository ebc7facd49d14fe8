use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

/// Names of the entries already present in `dir`; empty when it does not exist.
pub async fn existing_file_names<P: AsRef<Path>>(dir: P) -> io::Result<HashSet<String>> {
    let mut names = HashSet::new();
    let mut entries = match tokio::fs::read_dir(dir.as_ref()).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(e),
    };

    while let Some(entry) = entries.next_entry().await? {
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Regular files directly inside `dir`, sorted by name.
pub async fn list_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

pub async fn ensure_dir<P: AsRef<Path>>(dir: P) -> io::Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        async_fs::create_dir_all(dir).await?;
        log::info!("Created folder {}", dir.display());
    }
    Ok(())
}
