//! Input file discovery.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use walkdir::WalkDir;

/// Expand files and directories into the list of HTML documents to process.
///
/// Files are taken as given. Directories are walked for `.html`/`.htm` files in
/// file-name order.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if !path.exists() {
            bail!("Path not found: {}", path.display());
        }

        if path.is_file() {
            documents.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_html(path) {
                documents.push(path.to_path_buf());
            }
        }
    }

    Ok(documents)
}

fn is_html(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn walks_directories_for_html() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("pages")).unwrap();
        fs::write(root.join("b.html"), "").unwrap();
        fs::write(root.join("a.htm"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join("pages/c.HTML"), "").unwrap();

        let found = discover(&[root.to_path_buf()]).unwrap();

        assert_eq!(
            found,
            vec![root.join("a.htm"), root.join("b.html"), root.join("pages/c.HTML")]
        );
    }

    #[test]
    fn keeps_explicit_files() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("layout.tpl");
        fs::write(&file, "").unwrap();

        assert_eq!(discover(&[file.clone()]).unwrap(), vec![file]);
    }

    #[test]
    fn missing_path_is_an_error() {
        assert!(discover(&[PathBuf::from("/no/such/dir")]).is_err());
    }
}
