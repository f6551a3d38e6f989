/// A re-export statement found in a barrel file, pointing at either a
/// directory or an extensionless module stem resolved to a concrete file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReExport {
    pub target: String,
    pub kind: ReExportKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReExportKind {
    /// `export * from '...'`
    All,
    /// `export * as Name from '...'`
    AllAsName,
    /// `export { Names } from '...'`
    Named,
    /// `export type { Names } from '...'`
    TypeNamed,
}

/// Result of an alias lookup for a directory.
///
/// When no alias rule matches, both fields carry the directory itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub short_path: String,
    pub full_path: String,
}
