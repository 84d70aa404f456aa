use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use drawing_buddy_core::Stage;
use drawing_buddy_rendering::{Printer, Scene};

/// Printer that captures the presented frame into numbered PNG files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngPrinter {
    directory: PathBuf,
    captured: u32,
}

impl PngPrinter {
    /// Creates a printer writing captures into `directory`, created on first use.
    #[must_use]
    pub fn new<P>(directory: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            directory: directory.into(),
            captured: 0,
        }
    }

    /// Directory receiving the captures.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn next_path(&mut self, stage: Stage) -> PathBuf {
        loop {
            self.captured = self.captured.saturating_add(1);
            let path = self
                .directory
                .join(capture_file_name(stage, self.captured));
            if !path.exists() || self.captured == u32::MAX {
                return path;
            }
        }
    }
}

impl Printer for PngPrinter {
    fn print(&mut self, scene: &Scene) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "failed to create print directory {}",
                self.directory.display()
            )
        })?;

        let path = self.next_path(scene.view.stage);
        let target = path
            .to_str()
            .with_context(|| format!("print path {} is not valid UTF-8", path.display()))?;
        macroquad::texture::get_screen_data().export_png(target);

        Ok(path)
    }
}

fn capture_file_name(stage: Stage, sequence: u32) -> String {
    format!("drawing-buddy-{stage}-{sequence:03}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_directory(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("drawing-buddy-{label}-{nanos}"))
    }

    #[test]
    fn capture_names_include_stage_and_sequence() {
        assert_eq!(
            capture_file_name(Stage::Coloring, 7),
            "drawing-buddy-coloring-007.png"
        );
    }

    #[test]
    fn next_path_skips_existing_captures() {
        let directory = scratch_directory("print");
        fs::create_dir_all(&directory).expect("create scratch directory");
        fs::write(directory.join(capture_file_name(Stage::Coloring, 1)), b"")
            .expect("seed existing capture");

        let mut printer = PngPrinter::new(&directory);
        assert_eq!(printer.directory(), directory.as_path());
        let path = printer.next_path(Stage::Coloring);
        assert_eq!(path, directory.join("drawing-buddy-coloring-002.png"));

        fs::remove_dir_all(&directory).expect("clean scratch directory");
    }
}
