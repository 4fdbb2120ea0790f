use crate::manifest::{ManifestError, parse_nzb};

const NZB: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE nzb PUBLIC "-//newzBin//DTD NZB 1.1//EN" "http://www.newzbin.com/DTD/nzb/nzb-1.1.dtd">
<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb">
  <head>
    <meta type="title">Test Release</meta>
  </head>
  <file poster="poster@example.com" date="1700000000" subject="[1/2] - &quot;movie.mkv&quot; yEnc (1/3)">
    <groups>
      <group>alt.binaries.test</group>
      <group> alt.binaries.misc </group>
    </groups>
    <segments>
      <segment bytes="768000" number="3">part3@example</segment>
      <segment bytes="768000" number="1">&lt;part1@example&gt;</segment>
      <segment bytes="768000" number="2">part2@example</segment>
      <segment bytes="768000" number="2">part2-dup@example</segment>
    </segments>
  </file>
  <file poster="poster@example.com" date="" subject="readme without quotes">
    <groups><group>alt.binaries.test</group></groups>
    <segments>
      <segment number="1">readme@example</segment>
    </segments>
  </file>
</nzb>"#;

#[test]
fn parses_files_and_orders_segments() {
    let entries = parse_nzb(NZB).unwrap();
    assert_eq!(entries.len(), 2);

    let movie = &entries[0];
    assert_eq!(movie.name, "movie.mkv");
    assert_eq!(movie.poster, "poster@example.com");
    assert_eq!(movie.groups, vec!["alt.binaries.test", "alt.binaries.misc"]);
    assert_eq!(movie.timestamp.timestamp(), 1_700_000_000);

    let numbers: Vec<u32> = movie.segments.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    let ids: Vec<&str> = movie.segments.iter().map(|s| s.fetch_id.as_str()).collect();
    assert_eq!(ids, vec!["part1@example", "part2@example", "part3@example"]);
    assert_eq!(movie.declared_size, Some(768_000 * 3));
}

#[test]
fn name_falls_back_to_subject_and_missing_sizes() {
    let entries = parse_nzb(NZB).unwrap();
    let readme = &entries[1];
    assert_eq!(readme.name, "readme without quotes");
    assert_eq!(readme.declared_size, None);
    assert_eq!(readme.segments[0].declared_size, None);
    assert_eq!(readme.timestamp.timestamp(), 0);
}

#[test]
fn empty_manifest_has_no_files() {
    let err = parse_nzb(r#"<nzb xmlns="http://www.newzbin.com/DTD/2003/nzb"></nzb>"#).unwrap_err();
    assert!(matches!(err, ManifestError::NoFiles), "{err}");
}

#[test]
fn file_without_segments_is_kept_with_empty_segments() {
    let entries = parse_nzb(
        r#"<nzb><file poster="p" date="1" subject="&quot;a.bin&quot;"><groups/><segments/></file></nzb>"#,
    )
    .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "a.bin");
    assert!(entries[0].segments.is_empty());
}

#[test]
fn malformed_xml_is_an_error() {
    let err = parse_nzb("<nzb><file").unwrap_err();
    assert!(matches!(err, ManifestError::Xml(_)), "{err}");
}
