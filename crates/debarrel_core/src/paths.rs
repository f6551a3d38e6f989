use std::path::Path;

/// Lossy string form of a path, used for registry identities and rewritten
/// import paths.
pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
