//! Compilation of catalogs into their binary form.

use super::modified_time;
use crate::core::{Catalog, CliError, CompileSummary};
use crate::toolchain::Toolchain;

/// Whether `catalog` has no compiled form or is newer than it.
pub fn needs_compile(catalog: &Catalog) -> bool {
    let Some(compiled) = modified_time(&catalog.compiled_path()) else {
        return true;
    };
    modified_time(&catalog.path).is_none_or(|source| source > compiled)
}

/// Compile every stale catalog, stopping at the first compiler failure.
pub fn compile_catalogs(
    catalogs: &[Catalog],
    toolchain: &dyn Toolchain,
) -> Result<CompileSummary, CliError> {
    let mut summary = CompileSummary::default();

    for catalog in catalogs {
        if !needs_compile(catalog) {
            tracing::debug!(locale = %catalog.locale, "compiled catalog is up to date");
            summary.up_to_date.push(catalog.locale.clone());
            continue;
        }

        tracing::info!(locale = %catalog.locale, "compiling catalog");
        toolchain.compile(&catalog.path, &catalog.compiled_path())?;
        summary.compiled.push(catalog.locale.clone());
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::fake::{FakeToolchain, ToolCall};
    use std::fs;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn catalog(temp: &TempDir, locale: &str) -> Catalog {
        let catalog = Catalog::new(temp.path(), locale);
        fs::write(&catalog.path, format!("msgid \"{locale}\"\n")).unwrap();
        catalog
    }

    fn age(path: &std::path::Path, seconds: u64) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(seconds))
            .unwrap();
    }

    #[test]
    fn test_compiles_missing_then_skips() {
        let temp = TempDir::new().unwrap();
        let catalogs = vec![catalog(&temp, "de"), catalog(&temp, "fr")];
        let toolchain = FakeToolchain::default();

        let first = compile_catalogs(&catalogs, &toolchain).unwrap();
        assert_eq!(first.compiled, vec!["de", "fr"]);
        assert_eq!(
            fs::read_to_string(catalogs[1].compiled_path()).unwrap(),
            "compiled:msgid \"fr\"\n"
        );

        let second = compile_catalogs(&catalogs, &toolchain).unwrap();
        assert!(second.compiled.is_empty());
        assert_eq!(second.up_to_date, vec!["de", "fr"]);
    }

    #[test]
    fn test_newer_catalog_is_recompiled() {
        let temp = TempDir::new().unwrap();
        let fr = catalog(&temp, "fr");
        fs::write(fr.compiled_path(), "old").unwrap();
        age(&fr.compiled_path(), 120);

        assert!(needs_compile(&fr));
        let summary = compile_catalogs(std::slice::from_ref(&fr), &FakeToolchain::default()).unwrap();

        assert_eq!(summary.compiled, vec!["fr"]);
    }

    #[test]
    fn test_older_catalog_is_not_recompiled() {
        let temp = TempDir::new().unwrap();
        let fr = catalog(&temp, "fr");
        age(&fr.path, 120);
        fs::write(fr.compiled_path(), "current").unwrap();

        assert!(!needs_compile(&fr));
    }

    #[test]
    fn test_compiler_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let catalogs = vec![catalog(&temp, "de"), catalog(&temp, "fr")];
        let toolchain = FakeToolchain {
            failing_compiles: ["de".to_string()].into(),
            ..FakeToolchain::default()
        };

        let err = compile_catalogs(&catalogs, &toolchain).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            toolchain.calls(),
            vec![ToolCall::Compile(catalogs[0].path.clone())]
        );
        assert!(!catalogs[1].compiled_path().exists());
    }
}
