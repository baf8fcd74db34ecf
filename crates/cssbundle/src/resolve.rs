//! `@import` resolution with package lookup.
//!
//! Reading is delegated to lightningcss' [`FileProvider`]. Resolution follows
//! CSS URL semantics first (relative to the importing file) and falls back to
//! `node_modules` lookup for bare specifiers, where the package's
//! `package.json` fields are consulted in the configured order. URLs with a
//! scheme (`https:`, `data:`) or a leading `//` stay external: the `@import`
//! is kept in the output as written.

use lightningcss::bundler::{FileProvider, ResolveResult, SourceProvider};
use path_clean::PathClean;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File used when no `package.json` field names an existing stylesheet
const PACKAGE_INDEX: &str = "index.css";

/// Errors raised while locating or reading a stylesheet.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No file matched the specifier
    #[error("Could not resolve \"{specifier}\" imported from {}", .importer.display())]
    NotFound {
        specifier: String,
        importer: PathBuf,
    },

    /// A stylesheet could not be read
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A package manifest exists but is not valid JSON
    #[error("Invalid package manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source provider that resolves package imports through `main_fields`.
pub struct PackageProvider {
    files: FileProvider,
    main_fields: Vec<String>,
}

impl PackageProvider {
    /// Create a provider consulting `main_fields` in order
    pub fn new(main_fields: Vec<String>) -> Self {
        Self {
            files: FileProvider::new(),
            main_fields,
        }
    }

    /// Resolve `specifier` as written in `@import` inside `importer` to a
    /// file on disk.
    pub fn resolve_import(&self, specifier: &str, importer: &Path) -> Result<PathBuf, ResolveError> {
        let not_found = || ResolveError::NotFound {
            specifier: specifier.to_string(),
            importer: importer.to_path_buf(),
        };
        let base = importer.parent().unwrap_or_else(|| Path::new(""));

        if let Some(package) = specifier.strip_prefix('~') {
            return self.resolve_package(package, base)?.ok_or_else(not_found);
        }

        let path = Path::new(specifier);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        let relative = base.join(path).clean();
        if specifier.starts_with('.') || relative.is_file() {
            return Ok(relative);
        }

        self.resolve_package(specifier, base)?.ok_or_else(not_found)
    }

    /// Look `specifier` up in every `node_modules` above `base`.
    fn resolve_package(&self, specifier: &str, base: &Path) -> Result<Option<PathBuf>, ResolveError> {
        let Some((name, subpath)) = split_package_specifier(specifier) else {
            return Ok(None);
        };

        let start = std::path::absolute(base).unwrap_or_else(|_| base.to_path_buf());
        for dir in start.ancestors() {
            let package_dir = dir.join("node_modules").join(name);
            if !package_dir.is_dir() {
                continue;
            }

            let found = match subpath {
                Some(subpath) => Some(package_dir.join(subpath).clean()).filter(|p| p.is_file()),
                None => self.package_entry(&package_dir)?,
            };
            if let Some(path) = found {
                tracing::debug!(specifier, path = %path.display(), "resolved package import");
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Pick the stylesheet a package exposes, honoring field priority.
    fn package_entry(&self, package_dir: &Path) -> Result<Option<PathBuf>, ResolveError> {
        let manifest_path = package_dir.join("package.json");
        if manifest_path.is_file() {
            let raw = std::fs::read_to_string(&manifest_path).map_err(|source| {
                ResolveError::Read {
                    path: manifest_path.clone(),
                    source,
                }
            })?;
            let manifest: serde_json::Value =
                serde_json::from_str(&raw).map_err(|source| ResolveError::Manifest {
                    path: manifest_path.clone(),
                    source,
                })?;

            for field in &self.main_fields {
                // Object-valued fields (e.g. a "browser" replacement map) are skipped
                if let Some(target) = manifest.get(field).and_then(|v| v.as_str()) {
                    let candidate = package_dir.join(target).clean();
                    if candidate.is_file() {
                        return Ok(Some(candidate));
                    }
                }
            }
        }

        let index = package_dir.join(PACKAGE_INDEX);
        Ok(index.is_file().then_some(index))
    }
}

impl SourceProvider for PackageProvider {
    type Error = ResolveError;

    fn read<'a>(&'a self, file: &Path) -> Result<&'a str, Self::Error> {
        self.files.read(file).map_err(|source| ResolveError::Read {
            path: file.to_path_buf(),
            source,
        })
    }

    fn resolve(
        &self,
        specifier: &str,
        originating_file: &Path,
    ) -> Result<ResolveResult, Self::Error> {
        if is_external_url(specifier) {
            tracing::debug!(specifier, "keeping external import");
            return Ok(ResolveResult::External(specifier.to_string()));
        }
        self.resolve_import(specifier, originating_file)
            .map(ResolveResult::File)
    }
}

/// Whether `specifier` is a URL the bundler must not try to read.
///
/// A scheme needs at least two characters so Windows drive letters
/// (`C:\styles`) are still treated as paths.
fn is_external_url(specifier: &str) -> bool {
    if specifier.starts_with("//") {
        return true;
    }

    match specifier.split_once(':') {
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Split `@scope/name/sub/path` into the package name and optional sub-path.
fn split_package_specifier(specifier: &str) -> Option<(&str, Option<&str>)> {
    let name_end = if specifier.starts_with('@') {
        let slash = specifier.find('/')?;
        specifier[slash + 1..]
            .find('/')
            .map(|i| slash + 1 + i)
            .unwrap_or(specifier.len())
    } else {
        specifier.find('/').unwrap_or(specifier.len())
    };

    let name = &specifier[..name_end];
    if name.is_empty() || name.ends_with('/') {
        return None;
    }

    let subpath = specifier[name_end..]
        .strip_prefix('/')
        .filter(|rest| !rest.is_empty());
    Some((name, subpath))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn provider() -> PackageProvider {
        PackageProvider::new(vec![
            "browser".to_string(),
            "module".to_string(),
            "main".to_string(),
        ])
    }

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_split_package_specifier() {
        assert_eq!(split_package_specifier("normalize.css"), Some(("normalize.css", None)));
        assert_eq!(split_package_specifier("pkg/dist/a.css"), Some(("pkg", Some("dist/a.css"))));
        assert_eq!(split_package_specifier("@scope/pkg"), Some(("@scope/pkg", None)));
        assert_eq!(
            split_package_specifier("@scope/pkg/theme.css"),
            Some(("@scope/pkg", Some("theme.css")))
        );
        assert_eq!(split_package_specifier("@scope"), None);
        assert_eq!(split_package_specifier("pkg/"), Some(("pkg", None)));
    }

    #[test]
    fn test_is_external_url() {
        assert!(is_external_url("https://fonts.googleapis.com/css2?family=Inter"));
        assert!(is_external_url("http://example.com/a.css"));
        assert!(is_external_url("data:text/css,a{color:red}"));
        assert!(is_external_url("//cdn.example.com/reset.css"));
        assert!(!is_external_url("./base.css"));
        assert!(!is_external_url("theme"));
        assert!(!is_external_url("@acme/ui/dist/buttons.css"));
        assert!(!is_external_url("C:/styles/app.css"));
    }

    #[test]
    fn test_resolve_keeps_urls_external() {
        let importer = Path::new("src/app.css");
        let result = provider()
            .resolve("https://example.com/theme.css", importer)
            .unwrap();
        match result {
            ResolveResult::External(url) => assert_eq!(url, "https://example.com/theme.css"),
            ResolveResult::File(path) => panic!("expected external, got {}", path.display()),
        }
    }

    #[test]
    fn test_relative_import() {
        let temp = TempDir::new().unwrap();
        let importer = temp.path().join("src/app.css");
        write(&temp.path().join("src/base.css"), "a{}");

        let resolved = provider().resolve_import("./base.css", &importer).unwrap();
        assert_eq!(resolved, temp.path().join("src/base.css"));

        let resolved = provider().resolve_import("base.css", &importer).unwrap();
        assert_eq!(resolved, temp.path().join("src/base.css"));
    }

    #[test]
    fn test_parent_relative_import_is_cleaned() {
        let temp = TempDir::new().unwrap();
        let importer = temp.path().join("src/app.css");

        let resolved = provider().resolve_import("../shared/vars.css", &importer).unwrap();
        assert_eq!(resolved, temp.path().join("shared/vars.css"));
    }

    #[test]
    fn test_package_field_priority() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("node_modules/theme");
        write(
            &pkg.join("package.json"),
            r#"{ "main": "main.css", "module": "module.css", "browser": "browser.css" }"#,
        );
        write(&pkg.join("main.css"), "a{}");
        write(&pkg.join("module.css"), "a{}");
        write(&pkg.join("browser.css"), "a{}");

        let importer = temp.path().join("src/app.css");
        let resolved = provider().resolve_import("theme", &importer).unwrap();
        assert_eq!(resolved, pkg.join("browser.css"));
    }

    #[test]
    fn test_package_skips_missing_and_object_fields() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("node_modules/theme");
        write(
            &pkg.join("package.json"),
            r#"{ "browser": { "./a.js": false }, "module": "gone.css", "main": "main.css" }"#,
        );
        write(&pkg.join("main.css"), "a{}");

        let importer = temp.path().join("src/app.css");
        let resolved = provider().resolve_import("~theme", &importer).unwrap();
        assert_eq!(resolved, pkg.join("main.css"));
    }

    #[test]
    fn test_package_index_fallback_and_subpath() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("node_modules/@acme/ui");
        write(&pkg.join("index.css"), "a{}");
        write(&pkg.join("dist/buttons.css"), "a{}");

        let importer = temp.path().join("src/nested/app.css");
        assert_eq!(
            provider().resolve_import("@acme/ui", &importer).unwrap(),
            pkg.join("index.css")
        );
        assert_eq!(
            provider().resolve_import("@acme/ui/dist/buttons.css", &importer).unwrap(),
            pkg.join("dist/buttons.css")
        );
    }

    #[test]
    fn test_unresolvable_package() {
        let temp = TempDir::new().unwrap();
        let importer = temp.path().join("src/app.css");

        let err = provider().resolve_import("missing-pkg", &importer).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
        assert!(err.to_string().contains("missing-pkg"));
    }

    #[test]
    fn test_invalid_manifest() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("node_modules/broken/package.json"), "{ nope");

        let importer = temp.path().join("app.css");
        let err = provider().resolve_import("broken", &importer).unwrap_err();
        assert!(matches!(err, ResolveError::Manifest { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let err = provider()
            .read(Path::new("/definitely/not/here.css"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::Read { .. }));
    }
}
