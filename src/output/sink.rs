// Mon Oct 19 2026 - Alex

use crate::output::OutputResult;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where rendered text ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    Stdout,
    File(PathBuf),
}

impl OutputSink {
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::Stdout,
        }
    }

    pub fn write(&self, content: &str) -> OutputResult<()> {
        match self {
            Self::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(content.as_bytes())?;
                handle.flush()?;
            }
            Self::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                writer.write_all(content.as_bytes())?;
                writer.flush()?;
                log::info!("Wrote {} bytes to {}", content.len(), path.display());
            }
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Stdout => "stdout".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.c");
        let sink = OutputSink::from_option(Some(&path));
        sink.write("int x;\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "int x;\n");
        assert_eq!(sink.describe(), path.display().to_string());
    }

    #[test]
    fn test_default_is_stdout() {
        assert_eq!(OutputSink::from_option(None), OutputSink::Stdout);
    }
}
