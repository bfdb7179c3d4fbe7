use crate::core::download::Downloader;
use crate::core::progress::TransferProgress;
use crate::error::{AgetError, Result};
use crate::utils::fs;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use xmltree::Element;

/// Namespace prefixed to every `meta` element's `rel` attribute.
pub const DEFAULT_META_NAMESPACE: &str = "http://www.amazon.com/dmusic/";

/// Placeholder for missing title, creator and album.
pub const UNKNOWN: &str = "Unknown";

pub const DEFAULT_TRACK_TYPE: &str = "mp3";

#[derive(Debug, Default)]
struct FieldCache {
    location: OnceCell<Option<String>>,
    creator: OnceCell<Option<String>>,
    album: OnceCell<Option<String>>,
    title: OnceCell<Option<String>>,
    image: OnceCell<Option<String>>,
    duration: OnceCell<Option<String>>,
    track_num: OnceCell<Option<String>>,
    meta: OnceCell<HashMap<String, String>>,
}

/// One `<track>` record of a playlist.
///
/// Fields are read from the element on first access and cached for the
/// lifetime of the track.
#[derive(Debug)]
pub struct Track {
    node: Element,
    meta_namespace: String,
    cache: FieldCache,
}

impl Track {
    pub fn new(node: Element) -> Result<Self> {
        Self::with_meta_namespace(node, DEFAULT_META_NAMESPACE)
    }

    pub fn with_meta_namespace<S: Into<String>>(node: Element, meta_namespace: S) -> Result<Self> {
        if node.name != "track" {
            return Err(AgetError::InvalidTrack { tag: node.name });
        }

        Ok(Self {
            node,
            meta_namespace: meta_namespace.into(),
            cache: FieldCache::default(),
        })
    }

    /// Text of the named child. Missing children and empty elements are `None`.
    fn prop<'a>(&'a self, cell: &'a OnceCell<Option<String>>, name: &str) -> Option<&'a str> {
        cell.get_or_init(|| {
            self.node
                .get_child(name)
                .and_then(|child| child.get_text())
                .map(|text| text.into_owned())
                .filter(|text| !text.is_empty())
        })
        .as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.prop(&self.cache.location, "location")
    }

    pub fn creator(&self) -> Option<&str> {
        self.prop(&self.cache.creator, "creator")
    }

    pub fn album(&self) -> Option<&str> {
        self.prop(&self.cache.album, "album")
    }

    pub fn title(&self) -> Option<&str> {
        self.prop(&self.cache.title, "title")
    }

    pub fn image(&self) -> Option<&str> {
        self.prop(&self.cache.image, "image")
    }

    pub fn duration(&self) -> Option<&str> {
        self.prop(&self.cache.duration, "duration")
    }

    pub fn track_num(&self) -> Option<&str> {
        self.prop(&self.cache.track_num, "trackNum")
    }

    /// Key/value pairs from the `meta` children, keyed by `rel` minus the
    /// namespace prefix.
    pub fn meta(&self) -> &HashMap<String, String> {
        self.cache.meta.get_or_init(|| {
            self.node
                .children
                .iter()
                .filter_map(|child| child.as_element())
                .filter(|element| element.name == "meta")
                .filter_map(|element| {
                    let rel = element.attributes.get("rel")?;
                    let key = strip_namespace(rel, &self.meta_namespace);
                    let value = element
                        .get_text()
                        .map(|t| t.into_owned())
                        .unwrap_or_default();
                    Some((key.to_string(), value))
                })
                .collect()
        })
    }

    pub fn track_type(&self) -> &str {
        self.meta()
            .get("trackType")
            .map(String::as_str)
            .unwrap_or(DEFAULT_TRACK_TYPE)
    }

    /// Size announced by the `fileSize` meta entry, if it parses.
    pub fn file_size(&self) -> Option<u64> {
        self.meta()
            .get("fileSize")
            .and_then(|size| size.trim().parse().ok())
    }

    /// Build the output path for this track under `base`.
    ///
    /// With `full` the file sits in `<creator>/<album>/`, otherwise directly
    /// in `base`. Nothing is created on disk.
    pub fn make_filename(&self, base: &Path, full: bool) -> PathBuf {
        let title = self.title().unwrap_or(UNKNOWN);
        let name = match self.track_num() {
            Some(num) => format!("{num:0>2} - {title}"),
            None => title.to_string(),
        };
        let name = sanitize_component(&format!("{name}.{}", self.track_type()));

        if full {
            base.join(sanitize_component(self.creator().unwrap_or(UNKNOWN)))
                .join(sanitize_component(self.album().unwrap_or(UNKNOWN)))
                .join(name)
        } else {
            base.join(name)
        }
    }

    /// Download this track, returning the path written.
    ///
    /// Without an explicit `filename` the full `creator/album` layout under
    /// `out_dir` is used. Parent directories are created as needed.
    pub fn download(
        &self,
        downloader: &Downloader,
        out_dir: &Path,
        filename: Option<&Path>,
        show_progress: bool,
    ) -> Result<PathBuf> {
        let filename = match filename {
            Some(path) => path.to_path_buf(),
            None => self.make_filename(out_dir, true),
        };

        let location = self.location().ok_or_else(|| AgetError::MissingLocation {
            title: self.title().unwrap_or(UNKNOWN).to_string(),
        })?;

        let progress = if show_progress {
            TransferProgress::start(self.file_size())
        } else {
            TransferProgress::hidden(self.file_size())
        };

        if let Some(parent) = filename.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        downloader.fetch(location, &filename, |done, total| {
            progress.update(done, total)
        })?;

        progress.finish();

        Ok(filename)
    }
}

/// Drop the namespace from a `rel` value.
///
/// Values that don't start with the namespace lose the same number of
/// leading characters instead.
fn strip_namespace<'a>(rel: &'a str, namespace: &str) -> &'a str {
    if let Some(key) = rel.strip_prefix(namespace) {
        return key;
    }

    let skip = namespace.chars().count();
    match rel.char_indices().nth(skip) {
        Some((index, _)) => &rel[index..],
        None => "",
    }
}

fn sanitize_component(component: &str) -> String {
    component.replace(['/', '\\'], "_")
}
