use gdk_pixbuf::Pixbuf;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Icons are loaded once at this size and scaled to the button when drawn.
pub const ICON_SIZE: i32 = 64;

#[derive(Default)]
pub struct IconCache {
    icons: HashMap<&'static str, Pixbuf>,
}

impl IconCache {
    pub fn load(names: &[&'static str], extra_dir: Option<&Path>) -> Self {
        let dirs = icon_directories(extra_dir);
        let icons: HashMap<_, _> = names
            .iter()
            .filter_map(|&name| load_icon(&dirs, name).map(|pixbuf| (name, pixbuf)))
            .collect();

        if icons.len() < names.len() {
            log::debug!(
                "Found {} of {} tool icons, the rest are drawn as text",
                icons.len(),
                names.len()
            );
        }
        Self { icons }
    }

    pub fn get(&self, name: &str) -> Option<&Pixbuf> {
        self.icons.get(name)
    }
}

fn icon_directories(extra_dir: Option<&Path>) -> Vec<PathBuf> {
    let xdg = xdg::BaseDirectories::new();
    let mut dirs: Vec<PathBuf> = extra_dir.map(Path::to_path_buf).into_iter().collect();

    if let Some(home) = xdg.get_data_home() {
        dirs.push(home.join("gpwheel/icons"));
    }

    dirs.extend(
        xdg.get_data_dirs()
            .into_iter()
            .map(|p| p.join("gpwheel/icons")),
    );
    dirs
}

fn load_icon(dirs: &[PathBuf], name: &str) -> Option<Pixbuf> {
    dirs.iter()
        .map(|dir| dir.join(format!("{}.png", name)))
        .find(|path| path.is_file())
        .and_then(|path| match Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true) {
            Ok(pixbuf) => Some(pixbuf),
            Err(e) => {
                log::warn!("Failed to load icon {}: {}", path.display(), e);
                None
            }
        })
}
