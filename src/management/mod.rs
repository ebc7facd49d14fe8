mod folder;
mod manifest;

pub use folder::ensure_dir;
pub use folder::existing_file_names;
pub use folder::list_files;
pub use manifest::ALBUM_MANIFEST;
pub use manifest::ManifestManager;
pub use manifest::PROFILE_MANIFEST;
pub use manifest::WALL_MANIFEST;
