use crate::core::track::{Track, DEFAULT_META_NAMESPACE};
use crate::error::{AgetError, Result};
use std::cell::OnceCell;
use std::io::Read;
use xmltree::Element;

/// A parsed playlist document.
#[derive(Debug)]
pub struct Playlist {
    dom: Element,
    meta_namespace: String,
    title: OnceCell<Option<String>>,
    tracks: OnceCell<Vec<Track>>,
}

impl Playlist {
    /// Parse a playlist from its raw XML content.
    pub fn parse<B: AsRef<[u8]>>(content: B) -> Result<Self> {
        let dom = Element::parse(content.as_ref())?;

        if dom.name != "playlist" {
            return Err(AgetError::invalid_playlist(format!(
                "root element is <{}>, expected <playlist>",
                dom.name
            )));
        }

        Ok(Self {
            dom,
            meta_namespace: DEFAULT_META_NAMESPACE.to_string(),
            title: OnceCell::new(),
            tracks: OnceCell::new(),
        })
    }

    /// Read the whole stream, then parse it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Self::parse(content)
    }

    /// Use a different namespace prefix for track `meta` keys.
    ///
    /// Only affects tracks built after the call.
    pub fn with_meta_namespace<S: Into<String>>(mut self, meta_namespace: S) -> Self {
        self.meta_namespace = meta_namespace.into();
        self.tracks = OnceCell::new();
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title
            .get_or_init(|| {
                self.dom
                    .get_child("title")
                    .and_then(|title| title.get_text())
                    .map(|text| text.into_owned())
                    .filter(|text| !text.is_empty())
            })
            .as_deref()
    }

    /// Every `trackList/track` entry, in document order.
    pub fn tracks(&self) -> &[Track] {
        self.tracks.get_or_init(|| {
            self.dom
                .children
                .iter()
                .filter_map(|node| node.as_element())
                .filter(|element| element.name == "trackList")
                .flat_map(|list| list.children.iter().filter_map(|node| node.as_element()))
                .filter(|element| element.name == "track")
                .filter_map(|element| {
                    Track::with_meta_namespace(element.clone(), self.meta_namespace.as_str()).ok()
                })
                .collect()
        })
    }
}
