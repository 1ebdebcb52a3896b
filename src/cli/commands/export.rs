//! Export command.

use std::io::Write;

use crate::config::Settings;
use crate::export::{self, ExportOptions, ExportOutcome};
use crate::plex::PlexClient;

/// Connect to Plex, export rated tracks, and print a summary by rating.
pub async fn cmd_export(settings: &Settings, options: &ExportOptions) -> anyhow::Result<()> {
    eprintln!("Connecting to Plex at {}...", settings.url);
    let client = PlexClient::connect(&settings.url, &settings.token).await?;

    eprintln!(
        "Fetching tracks with rating >= {} stars...",
        options.min_stars
    );
    let outcome = export::run(&client, options).await?;
    report(&outcome, &mut std::io::stderr().lock())?;

    Ok(())
}

/// Print the operator-facing result of a run
fn report(outcome: &ExportOutcome, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Found {} total tracks", outcome.total_tracks())?;

    match outcome {
        ExportOutcome::NoTracks { .. } => {
            writeln!(out, "No rated tracks found.")?;
        }
        ExportOutcome::Exported {
            output,
            track_count,
            summary,
            ..
        } => {
            writeln!(out, "Exported {} tracks to {}", track_count, output.display())?;
            writeln!(out)?;
            writeln!(out, "By rating:")?;
            for line in summary.lines() {
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::domain::{ExportedTrack, RatingSummary};
    use std::path::PathBuf;

    fn rendered(outcome: &ExportOutcome) -> String {
        let mut out = Vec::new();
        report(outcome, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_no_tracks() {
        let text = rendered(&ExportOutcome::NoTracks { total_tracks: 4 });
        assert_eq!(text, "Found 4 total tracks\nNo rated tracks found.\n");
    }

    #[test]
    fn test_report_exported_summary() {
        let track = |rating| ExportedTrack {
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            path: "a.mp3".to_string(),
            rating,
            duration_ms: None,
        };
        let outcome = ExportOutcome::Exported {
            output: PathBuf::from("plex_ratings.json"),
            total_tracks: 10,
            track_count: 3,
            summary: RatingSummary::from_tracks(&[track(4), track(5), track(4)]),
        };

        assert_eq!(
            rendered(&outcome),
            "Found 10 total tracks\n\
             Exported 3 tracks to plex_ratings.json\n\
             \n\
             By rating:\n  \
             ★★★★★: 1 tracks\n  \
             ★★★★☆: 2 tracks\n"
        );
    }
}
