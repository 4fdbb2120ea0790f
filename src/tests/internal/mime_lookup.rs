use crate::mime::{DEFAULT_MIME_TYPE, lookup_mime_type};

#[test]
fn known_extensions() {
    assert_eq!(lookup_mime_type("readme.txt"), "text/plain");
    assert_eq!(lookup_mime_type("Movie.MKV"), "video/x-matroska");
    assert_eq!(lookup_mime_type("archive.part01.rar"), "application/vnd.rar");
}

#[test]
fn unknown_or_missing_extension_falls_back() {
    assert_eq!(lookup_mime_type("data.unknownext"), DEFAULT_MIME_TYPE);
    assert_eq!(lookup_mime_type("Makefile"), DEFAULT_MIME_TYPE);
    assert_eq!(lookup_mime_type(".hidden"), DEFAULT_MIME_TYPE);
    assert_eq!(lookup_mime_type(""), DEFAULT_MIME_TYPE);
}
