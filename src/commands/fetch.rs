use crate::commands::list;
use crate::core::config::FetchOptions;
use crate::core::download::Downloader;
use crate::core::playlist::Playlist;
use crate::core::track::UNKNOWN;
use crate::error::{AgetError, Result};
use crate::utils::fs;
use std::fs::File;
use std::io::Read;

pub fn load_playlist(options: &FetchOptions) -> Result<Playlist> {
    let file_access = |e: std::io::Error| AgetError::FileAccess {
        path: options.playlist.clone(),
        source: e,
    };
    let mut content = Vec::new();
    File::open(&options.playlist)
        .and_then(|mut file| file.read_to_end(&mut content))
        .map_err(file_access)?;

    let playlist = Playlist::parse(content)
        .map_err(|e| match e {
            AgetError::InvalidPlaylist { .. } => e,
            other => AgetError::invalid_playlist(other.to_string()),
        })?
        .with_meta_namespace(options.meta_namespace.as_str());

    Ok(playlist)
}

/// Download every track of the playlist into the output root.
///
/// Stops at the first failing track; tracks already written stay on disk.
pub fn run(options: &FetchOptions) -> Result<()> {
    let playlist = load_playlist(options)?;
    let tracks = playlist.tracks();
    let total = tracks.len();

    println!("Found {total} tracks...");

    let out_root = options.output_root()?;

    if options.dry_run {
        list::print_plan(&playlist, &out_root, options.full_paths);
        return Ok(());
    }

    fs::ensure_dir_exists(&out_root)?;

    let downloader = Downloader::new()?;
    for (index, track) in tracks.iter().enumerate() {
        println!(
            "Downloading {} of {}: {}...",
            index + 1,
            total,
            track.title().unwrap_or(UNKNOWN)
        );

        let filename = track.make_filename(&out_root, options.full_paths);
        track.download(
            &downloader,
            &out_root,
            Some(filename.as_path()),
            options.show_progress,
        )?;
    }

    println!("Finished!");
    Ok(())
}
