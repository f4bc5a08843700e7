// src/output/writer.rs

//! Writes forwarded units back to disk.

use crate::core_types::FileUnit;
use crate::errors::{io_error_with_path, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Writes one forwarded unit.
///
/// Without `dest`, only reformatted units are written, in place. With `dest`,
/// every buffered unit is written to `dest/<relative path>`, creating
/// directories as needed. Returns the path written, if any.
pub async fn write_unit(unit: &FileUnit, dest: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(bytes) = unit.buffer() else {
        return Ok(None);
    };

    let target = match dest {
        Some(dir) => dir.join(unit.relative()),
        None if unit.is_prettier => unit.path.clone(),
        None => return Ok(None),
    };

    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error_with_path(e, parent))?;
    }
    tokio::fs::write(&target, bytes)
        .await
        .map_err(|e| io_error_with_path(e, &target))?;
    debug!("Wrote {}", target.display());
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Contents;
    use std::fs;
    use tempfile::tempdir;

    fn unit(root: &Path, name: &str, text: &str, is_prettier: bool) -> FileUnit {
        let mut unit = FileUnit::new(root, root, root.join(name))
            .with_contents(Contents::Buffer(text.as_bytes().to_vec()));
        unit.is_prettier = is_prettier;
        unit
    }

    #[tokio::test]
    async fn test_in_place_writes_only_changed_units() -> anyhow::Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("a.js"), "old")?;
        fs::write(temp.path().join("b.js"), "same")?;

        let written = write_unit(&unit(temp.path(), "a.js", "new", true), None).await?;
        assert_eq!(written, Some(temp.path().join("a.js")));
        let skipped = write_unit(&unit(temp.path(), "b.js", "ignored", false), None).await?;
        assert_eq!(skipped, None);

        assert_eq!(fs::read_to_string(temp.path().join("a.js"))?, "new");
        assert_eq!(fs::read_to_string(temp.path().join("b.js"))?, "same");
        Ok(())
    }

    #[tokio::test]
    async fn test_dest_mirrors_relative_layout() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let dest = temp.path().join("out");

        write_unit(&unit(temp.path(), "nested/a.js", "a", false), Some(&dest)).await?;

        assert_eq!(fs::read_to_string(dest.join("nested").join("a.js"))?, "a");
        Ok(())
    }

    #[tokio::test]
    async fn test_null_unit_is_not_written() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let unit = FileUnit::new(temp.path(), temp.path(), temp.path().join("dir"));
        assert_eq!(write_unit(&unit, Some(temp.path())).await?, None);
        Ok(())
    }
}
