use fs_extra::file::CopyOptions;
use std::path::Component;
use std::path::{Path, PathBuf};

use crate::error::Fault;

/// Transforms a [PathBuf] into a [String] with forward slashes acting as the
/// separator, regardless of the host platform.
pub fn into_std_str(path: PathBuf) -> String {
    path.display().to_string().replace('\\', "/")
}

pub trait Standardize {
    /// Normalizes the path without touching the filesystem.
    ///
    /// Removes `.` components and folds `..` components into their parent
    /// where a parent exists in the path itself. The path is not required
    /// to exist, which keeps resolution a pure computation.
    fn standardize(&self) -> PathBuf;
}

impl Standardize for PathBuf {
    fn standardize(&self) -> PathBuf {
        self.as_path().standardize()
    }
}

impl Standardize for Path {
    fn standardize(&self) -> PathBuf {
        let mut result = PathBuf::new();
        let mut depth = 0;
        for comp in self.components() {
            match comp {
                Component::CurDir => (),
                Component::ParentDir => {
                    // fold into the previous normal component if one exists
                    if depth > 0 {
                        result.pop();
                        depth -= 1;
                    } else {
                        result.push(comp);
                    }
                }
                Component::Normal(_) => {
                    result.push(comp);
                    depth += 1;
                }
                Component::RootDir | Component::Prefix(_) => {
                    result.push(comp);
                }
            }
        }
        result
    }
}

/// Resolves a relative path into a full path if given relative to some `root` path.
///
/// If the path does not exist on disk or is already absolute, the original
/// text is returned unchanged.
pub fn resolve_rel_path(root: &Path, s: &str) -> String {
    let resolved_path = root.join(s);
    if resolved_path.exists() == true && PathBuf::from(s).is_relative() == true {
        into_std_str(resolved_path)
    } else {
        s.to_string()
    }
}

/// Copies the file at `src` to the `dst` file path, creating any missing
/// directories along the way. Returns the number of bytes copied.
pub fn copy_file(src: &Path, dst: &Path, overwrite: bool) -> Result<u64, Fault> {
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let opts = CopyOptions::new().overwrite(overwrite);
    Ok(fs_extra::file::copy(src, dst, &opts)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn standardize_path() {
        let p = PathBuf::from("plugin/Source/Render/../../Libraries");
        assert_eq!(p.standardize(), PathBuf::from("plugin/Libraries"));

        let p = PathBuf::from("./a/./b/c");
        assert_eq!(p.standardize(), PathBuf::from("a/b/c"));

        // parent components with nothing to fold into are kept
        let p = PathBuf::from("../up/two");
        assert_eq!(p.standardize(), PathBuf::from("../up/two"));

        let p = PathBuf::from("/root/a/../b");
        assert_eq!(p.standardize(), PathBuf::from("/root/b"));
    }

    #[test]
    fn std_str() {
        let p = PathBuf::from("a").join("b").join("c.lib");
        assert_eq!(into_std_str(p).contains('\\'), false);
    }

    #[test]
    fn resolve_path_simple() {
        let rel_root = std::env::current_dir().unwrap();
        // expands relative path to full path
        assert_eq!(
            resolve_rel_path(&rel_root, "src/lib.rs"),
            into_std_str(rel_root.join("src/lib.rs"))
        );
        // no file or directory named 'missing' at the relative root
        assert_eq!(resolve_rel_path(&rel_root, "missing"), String::from("missing"));
    }

    #[test]
    fn copy_into_new_dir() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("avstream.dll");
        std::fs::write(&src, "binary").unwrap();
        let dst = dir.path().join("Binaries/Win64/avstream.dll");
        let bytes = copy_file(&src, &dst, false).unwrap();
        assert_eq!(bytes, 6);
        assert_eq!(dst.exists(), true);
    }
}
