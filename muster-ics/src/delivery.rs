//! Handing a finished document to its destination.
//!
//! The builder never touches I/O. A [`DocumentSink`] receives the UTF-8
//! bytes and a filename and decides where they go: a directory on disk,
//! stdout, an HTTP body.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::event::Event;

pub const CALENDAR_MIME_TYPE: &str = "text/calendar; charset=utf-8";
pub const ICS_EXTENSION: &str = "ics";

/// Destination for an exported document.
pub trait DocumentSink {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> ExportResult<()>;
}

/// Writes each document as `<dir>/<filename>`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> ExportResult<()> {
        check_filename(filename)?;
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(filename);

        // The temp file is removed on drop, so any failure below leaves the
        // directory as it was.
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| e.error)?;

        debug!(path = %path.display(), bytes = bytes.len(), "Wrote calendar file");
        Ok(())
    }
}

/// A filename must name a single entry inside the sink's directory.
fn check_filename(filename: &str) -> ExportResult<()> {
    let mut components = Path::new(filename).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == filename
    );

    if single && !filename.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(ExportError::validation(
            "filename",
            format!("{filename:?} is not a plain file name"),
        ))
    }
}

/// Writes documents to any writer, e.g. stdout. The filename is ignored.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DocumentSink for WriterSink<W> {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> ExportResult<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        debug!(
            filename,
            content_type = CALENDAR_MIME_TYPE,
            bytes = bytes.len(),
            "Wrote calendar document to stream"
        );
        Ok(())
    }
}

/// Deliver a document under `filename`, forcing the `.ics` extension.
///
/// An empty document is refused: it is what a build over zero events
/// returns, and it is not a calendar file.
pub fn deliver_as_file(
    document: &str,
    filename: &str,
    sink: &mut dyn DocumentSink,
) -> ExportResult<String> {
    if document.is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let filename = ensure_ics_extension(filename);
    sink.deliver(document.as_bytes(), &filename)?;
    Ok(filename)
}

/// Append `.ics` unless the name already ends with it (case-insensitive).
pub fn ensure_ics_extension(filename: &str) -> String {
    let has_extension = Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ICS_EXTENSION));

    if has_extension {
        filename.to_string()
    } else {
        format!("{filename}.{ICS_EXTENSION}")
    }
}

/// Filename for a single-event export: every non-alphanumeric character of
/// the title becomes `_`.
pub fn filename_for_event(event: &Event) -> String {
    if event.title.is_empty() {
        return format!("event.{ICS_EXTENSION}");
    }

    let stem: String = event
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    format!("{stem}.{ICS_EXTENSION}")
}

/// Filename for a multi-event export from a caller-supplied base name.
pub fn filename_for_batch(base: &str) -> String {
    ensure_ics_extension(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_event(title: &str) -> Event {
        Event::new(
            "evt-1",
            title,
            "2025-07-04T14:00:00-05:00",
            "2025-06-01T12:00:00Z",
            "2025-06-02T08:30:00Z",
        )
    }

    #[derive(Default)]
    struct RecordingSink {
        deliveries: Vec<(Vec<u8>, String)>,
    }

    impl DocumentSink for RecordingSink {
        fn deliver(&mut self, bytes: &[u8], filename: &str) -> ExportResult<()> {
            self.deliveries.push((bytes.to_vec(), filename.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_filename_for_event_replaces_non_alphanumeric() {
        assert_eq!(
            filename_for_event(&make_test_event("Drill Day")),
            "Drill_Day.ics"
        );
        assert_eq!(
            filename_for_event(&make_test_event("CPR/AED: Re-cert (2025)")),
            "CPR_AED__Re_cert__2025_.ics"
        );
        assert_eq!(filename_for_event(&make_test_event("Café")), "Caf_.ics");
        assert_eq!(filename_for_event(&make_test_event("")), "event.ics");
    }

    #[test]
    fn test_ensure_ics_extension() {
        assert_eq!(ensure_ics_extension("shifts"), "shifts.ics");
        assert_eq!(ensure_ics_extension("shifts.ics"), "shifts.ics");
        assert_eq!(ensure_ics_extension("shifts.ICS"), "shifts.ICS");
        assert_eq!(ensure_ics_extension("shifts.txt"), "shifts.txt.ics");
        assert_eq!(filename_for_batch("july-roster"), "july-roster.ics");
    }

    #[test]
    fn test_deliver_passes_bytes_unchanged() {
        let document = "BEGIN:VCALENDAR\r\nSUMMARY:Ünïcödé\r\nEND:VCALENDAR\r\n";
        let mut sink = RecordingSink::default();

        let filename = deliver_as_file(document, "roster", &mut sink).unwrap();

        assert_eq!(filename, "roster.ics");
        assert_eq!(sink.deliveries.len(), 1);
        assert_eq!(sink.deliveries[0].0, document.as_bytes());
        assert_eq!(sink.deliveries[0].1, "roster.ics");
    }

    #[test]
    fn test_deliver_refuses_empty_document() {
        let mut sink = RecordingSink::default();
        let err = deliver_as_file("", "roster.ics", &mut sink).unwrap_err();

        assert!(matches!(err, ExportError::EmptyDocument));
        assert!(sink.deliveries.is_empty());
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("exports");
        let mut sink = DirectorySink::new(&out_dir);
        let document = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";

        let filename = deliver_as_file(document, "Drill_Day", &mut sink).unwrap();

        let written = std::fs::read(out_dir.join(&filename)).unwrap();
        assert_eq!(written, document.as_bytes());

        // No temp files left behind
        let entries: Vec<_> = std::fs::read_dir(&out_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("Drill_Day.ics")]);
    }

    #[test]
    fn test_directory_sink_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());

        deliver_as_file("first\r\n", "a.ics", &mut sink).unwrap();
        deliver_as_file("second\r\n", "a.ics", &mut sink).unwrap();

        let written = std::fs::read_to_string(dir.path().join("a.ics")).unwrap();
        assert_eq!(written, "second\r\n");
    }

    #[test]
    fn test_writer_sink_writes_bytes() {
        let mut sink = WriterSink::new(Vec::new());
        deliver_as_file("BEGIN:VCALENDAR\r\n", "x", &mut sink).unwrap();
        assert_eq!(sink.into_inner(), b"BEGIN:VCALENDAR\r\n");
    }

    #[test]
    fn test_directory_sink_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("a.ics");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        let mut sink = DirectorySink::new(dir.path());
        let err = deliver_as_file("BEGIN:VCALENDAR\r\n", "a.ics", &mut sink).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)), "{err:?}");

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("a.ics")]);
    }

    #[test]
    fn test_directory_sink_rejects_nested_filename() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());

        for name in ["sub/roster", "../roster.ics", "sub\\roster"] {
            let err = deliver_as_file("BEGIN:VCALENDAR\r\n", name, &mut sink).unwrap_err();
            assert!(
                matches!(err, ExportError::Validation { field: "filename", .. }),
                "{name}: {err:?}"
            );
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
