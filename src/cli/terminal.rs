use std::io::Write;

use log::debug;

use crate::{
    app::{NotifyStyle, RenderSink},
    domain::{Track, TrackId},
};

/// Prints every view update as plain lines.
pub struct TerminalSink<W> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            debug!("failed to write to terminal: {e}");
        }
    }
}

fn describe(track: &Track) -> String {
    let mut text = format!("{} - {}", track.artist, track.title);
    if !track.album.is_empty() {
        text.push_str(&format!(" [{}", track.album));
        if !track.release_year.is_empty() {
            text.push_str(&format!(" ({})", track.release_year));
        }
        text.push(']');
    }
    text
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render_search_result(&mut self, track: &Track, favorited: bool) {
        let star = if favorited { '*' } else { ' ' };
        self.line(&format!("{star} {:>12}  {}", track.id, describe(track)));
    }

    fn render_favorite(&mut self, track: &Track) {
        self.line(&format!("  {:>12}  {}", track.id, describe(track)));
    }

    fn remove_favorite_view(&mut self, id: TrackId) {
        self.line(&format!("- {id:>12}"));
    }

    fn clear_results_view(&mut self, placeholder: Option<&str>) {
        self.line("Results:");
        if let Some(text) = placeholder {
            self.line(&format!("  {text}"));
        }
    }

    fn clear_favorites_view(&mut self, placeholder: Option<&str>) {
        self.line("Favorites:");
        if let Some(text) = placeholder {
            self.line(&format!("  {text}"));
        }
    }

    fn notify(&mut self, message: &str, style: NotifyStyle) {
        let prefix = match style {
            NotifyStyle::Plain | NotifyStyle::Info => "::",
            NotifyStyle::Success => "ok",
            NotifyStyle::Warning => "!!",
        };
        self.line(&format!("{prefix} {message}"));
    }

    fn show_busy_indicator(&mut self) {
        self.line("Searching...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(f: impl FnOnce(&mut TerminalSink<Vec<u8>>)) -> String {
        let mut sink = TerminalSink::new(Vec::new());
        f(&mut sink);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn renders_results_with_star() {
        let track = Track::new(TrackId(42), "Title", "Artist")
            .with_album("Album")
            .with_release_year("2001");

        let text = output(|s| {
            s.render_search_result(&track, true);
            s.render_search_result(&Track::new(TrackId(7), "Bare", "Someone"), false);
        });

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "*           42  Artist - Title [Album (2001)]");
        assert_eq!(lines[1], "             7  Someone - Bare");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_output_does_not_panic() {
        let mut sink = TerminalSink::new(BrokenPipe);
        sink.notify("Favorites cleared!", NotifyStyle::Info);
        sink.show_busy_indicator();
    }

    #[test]
    fn placeholders_and_notifications() {
        let text = output(|s| {
            s.clear_favorites_view(Some("You have no favorites"));
            s.notify("Song added to favorites!", NotifyStyle::Success);
            s.notify("Song not in favorites!", NotifyStyle::Warning);
        });

        assert_eq!(
            text,
            "Favorites:\n  You have no favorites\nok Song added to favorites!\n!! Song not in favorites!\n"
        );
    }
}
