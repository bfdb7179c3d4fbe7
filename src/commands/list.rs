use crate::core::playlist::Playlist;
use crate::core::track::UNKNOWN;
use std::path::{Path, PathBuf};

/// Destination of every track, in playlist order.
pub fn planned_paths(playlist: &Playlist, out_root: &Path, full_paths: bool) -> Vec<PathBuf> {
    playlist
        .tracks()
        .iter()
        .map(|track| track.make_filename(out_root, full_paths))
        .collect()
}

/// Print where each track would be saved without touching the disk.
pub fn print_plan(playlist: &Playlist, out_root: &Path, full_paths: bool) {
    let tracks = playlist.tracks();
    let total = tracks.len();

    for (index, (track, path)) in tracks
        .iter()
        .zip(planned_paths(playlist, out_root, full_paths))
        .enumerate()
    {
        println!(
            "{} of {}: {} -> {}",
            index + 1,
            total,
            track.title().unwrap_or(UNKNOWN),
            path.display()
        );
        if track.location().is_none() {
            println!("   (no location, would fail)");
        }
    }
}
