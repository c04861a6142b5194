use std::path::Path;

use walkdir::WalkDir;

/// Counts of entries below an export directory (the root itself excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentStats {
    pub files: usize,
    pub directories: usize,
}

/// Recursively counts plain files and directories under `root`.
///
/// Best effort: entries that cannot be read (permission denied, vanished
/// mid-walk, broken symlinks) are skipped rather than reported. An
/// unreadable directory still counts as one directory; its contents do not.
/// Symlinks are followed. FIFOs, sockets and device nodes are not counted.
pub fn count_entries(root: impl AsRef<Path>) -> ContentStats {
    let mut stats = ContentStats::default();

    for entry in WalkDir::new(root.as_ref()).min_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            stats.directories += 1;
        } else if file_type.is_file() {
            stats.files += 1;
        }
    }

    stats
}
