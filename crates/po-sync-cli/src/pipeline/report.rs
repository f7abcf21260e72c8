//! Per-catalog completeness statistics.

use crate::core::Catalog;
use crate::toolchain::Toolchain;
use std::io::{self, Write};

/// Write one `<locale>.po: <stats>` line per catalog.
///
/// A catalog the compiler cannot read gets its error in place of the
/// statistics; the remaining catalogs are still reported.
pub fn report_statistics(
    catalogs: &[Catalog],
    toolchain: &dyn Toolchain,
    out: &mut impl Write,
) -> io::Result<()> {
    for catalog in catalogs {
        let stats = match toolchain.statistics(&catalog.path) {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(locale = %catalog.locale, "statistics failed: {err}");
                err.summary()
            },
        };
        writeln!(out, "{}: {}", catalog.file_name(), stats)?;
    }
    Ok(())
}
