use crate::config::Config;
use crate::consts;
use crate::history::History;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::io;
use std::path::{Path, PathBuf};

/// Name of the per-user directories holding configuration and data
pub(crate) const APP_DIR_NAME: &str = "gridsnake";

/// State that outlives a single game session
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) history: History,
}

/// Return the directory in which history & logs are stored by default
pub(crate) fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(APP_DIR_NAME))
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a rectangle of (at most) `size` centered in `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [centered] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(centered);
    centered
}

/// Replace the contents of `path` by writing to a sibling temporary file and
/// renaming it into place.  The parent directory must already exist.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path_for(path);
    fs_err::write(&tmp_path, contents)?;
    if let Err(e) = fs_err::rename(&tmp_path, path) {
        let _ = fs_err::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Expand a leading `~/` to the user's home directory
pub(crate) fn expand_tilde(path: String) -> io::Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine home directory",
            )
        }),
        None => Ok(PathBuf::from(path)),
    }
}

/// Format an error together with its chain of sources on one line
pub(crate) fn report<E: Into<anyhow::Error>>(e: E) -> String {
    format!("{:#}", e.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;
    use thiserror::Error;

    #[rstest]
    #[case(Rect::new(0, 0, 96, 33), Size::new(96, 33), Rect::new(0, 0, 96, 33))]
    #[case(Rect::new(0, 0, 100, 41), Size::new(96, 33), Rect::new(2, 4, 96, 33))]
    #[case(Rect::new(0, 0, 20, 10), Size::new(6, 4), Rect::new(7, 3, 6, 4))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }

    #[test]
    fn write_atomic_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("file.json.tmp").exists());
    }

    #[test]
    fn plain_path_unexpanded() {
        assert_eq!(
            expand_tilde(String::from("/var/lib/history.json")).unwrap(),
            PathBuf::from("/var/lib/history.json")
        );
    }

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn report_includes_sources() {
        assert_eq!(report(Outer(Inner)), "outer: inner");
    }
}
