use crate::error::{AgetError, Result};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use url::Url;

const CHUNK_SIZE: usize = 8192;

/// Fetches track locations to local files.
///
/// `http` and `https` locations go through a blocking HTTP client with no
/// timeout. `file://` URLs and plain filesystem paths are copied directly.
pub struct Downloader {
    client: Client,
}

enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl Downloader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("aget/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<std::time::Duration>)
            .build()?;

        Ok(Self { client })
    }

    /// Write the content at `location` to `destination`, replacing any
    /// existing file.
    ///
    /// `on_progress` receives `(bytes_so_far, total)` once before the first
    /// chunk and after every chunk. Returns the number of bytes written.
    pub fn fetch<F>(&self, location: &str, destination: &Path, mut on_progress: F) -> Result<u64>
    where
        F: FnMut(u64, Option<u64>),
    {
        match resolve_source(location)? {
            Source::Remote(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()?
                    .error_for_status()
                    .map_err(|e| AgetError::download_error(url.as_str(), e.to_string()))?;
                let total = response.content_length();
                let mut output = File::create(destination)?;
                copy_with_progress(response, &mut output, total, &mut on_progress)
            }
            Source::Local(path) => {
                let input = File::open(&path)
                    .map_err(|e| AgetError::download_error(location, e.to_string()))?;
                let total = input.metadata().ok().map(|m| m.len());
                let mut output = File::create(destination)?;
                copy_with_progress(input, &mut output, total, &mut on_progress)
            }
        }
    }
}

fn resolve_source(location: &str) -> Result<Source> {
    match Url::parse(location) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(Source::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Source::Local)
                .map_err(|_| AgetError::download_error(location, "not a local file URL")),
            // Windows drive letters parse as a one-letter scheme.
            scheme if scheme.len() == 1 => Ok(Source::Local(PathBuf::from(location))),
            scheme => Err(AgetError::download_error(
                location,
                format!("unsupported scheme '{scheme}'"),
            )),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Source::Local(PathBuf::from(location))),
        Err(e) => Err(AgetError::download_error(location, e.to_string())),
    }
}

fn copy_with_progress<R, W, F>(
    mut reader: R,
    writer: &mut W,
    total: Option<u64>,
    on_progress: &mut F,
) -> Result<u64>
where
    R: Read,
    W: Write,
    F: FnMut(u64, Option<u64>),
{
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut transferred = 0u64;
    on_progress(transferred, total);

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        writer.write_all(&buffer[..read])?;
        transferred += read as u64;
        on_progress(transferred, total);
    }

    writer.flush()?;
    Ok(transferred)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_local_path() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.mp3");
        let content: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&source, &content).unwrap();

        let destination = temp.path().join("copy.mp3");
        let mut calls = Vec::new();
        let downloader = Downloader::new().unwrap();
        let written = downloader
            .fetch(source.to_str().unwrap(), &destination, |done, total| {
                calls.push((done, total))
            })
            .unwrap();

        assert_eq!(written, 20_000);
        assert_eq!(std::fs::read(&destination).unwrap(), content);
        assert_eq!(calls.first(), Some(&(0, Some(20_000))));
        assert_eq!(calls.last(), Some(&(20_000, Some(20_000))));
        assert!(calls.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    }

    #[test]
    fn test_fetch_file_url_overwrites() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("track.flac");
        std::fs::write(&source, b"new audio").unwrap();
        let destination = temp.path().join("out.flac");
        std::fs::write(&destination, b"stale content that is longer").unwrap();

        let url = Url::from_file_path(&source).unwrap();
        let downloader = Downloader::new().unwrap();
        downloader
            .fetch(url.as_str(), &destination, |_, _| {})
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"new audio");
    }

    #[test]
    fn test_fetch_missing_source() {
        let temp = TempDir::new().unwrap();
        let downloader = Downloader::new().unwrap();
        let result = downloader.fetch(
            temp.path().join("nope.mp3").to_str().unwrap(),
            &temp.path().join("out.mp3"),
            |_, _| {},
        );
        assert!(matches!(result, Err(AgetError::DownloadError { .. })));
    }

    #[test]
    fn test_unsupported_scheme() {
        assert!(matches!(
            resolve_source("ftp://example.com/song.mp3"),
            Err(AgetError::DownloadError { .. })
        ));
        assert!(matches!(
            resolve_source("https://example.com/song.mp3"),
            Ok(Source::Remote(_))
        ));
        assert!(matches!(
            resolve_source("relative/song.mp3"),
            Ok(Source::Local(_))
        ));
    }
}
