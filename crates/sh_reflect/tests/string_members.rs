use core::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};
use sh_reflect::Reflect;
use sh_reflect::access::AccessorCache;
use sh_reflect::derive::Reflect;

/// Counts `warn!` and `error!` records.
struct WarnCounter(AtomicUsize);

impl Log for WarnCounter {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

static WARNINGS: WarnCounter = WarnCounter(AtomicUsize::new(0));

#[derive(Reflect, Default)]
struct Note {
    title: Option<String>,
    body: String,
    pages: u32,
}

// Single test in this binary, so the global logger sees only this code.
#[test]
fn string_members_read_without_warnings() {
    log::set_logger(&WARNINGS).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let cache = AccessorCache::new();
    let note = Note {
        title: Some("draft".into()),
        body: "text".into(),
        pages: 3,
    };
    let empty = Note::default();

    for _ in 0..3 {
        let title = cache.get_property_string(Some(note.as_reflect()), "title");
        assert_eq!(title.unwrap().as_deref(), Some("draft"));

        let title = cache.get_property_string(Some(empty.as_reflect()), "title");
        assert_eq!(title.unwrap(), None);

        let body = cache.get_property_string(Some(note.as_reflect()), "body");
        assert_eq!(body.unwrap().as_deref(), Some("text"));
    }
    assert_eq!(WARNINGS.0.load(Ordering::SeqCst), 0);
    // One `Option<String>` getter and one `String` getter.
    assert_eq!(cache.len(), 2);

    // A real mismatch is still reported, and logged once per attempt.
    assert!(cache.get_property_string(Some(note.as_reflect()), "pages").is_err());
    assert_eq!(WARNINGS.0.load(Ordering::SeqCst), 1);
}
