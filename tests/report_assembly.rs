//! End-to-end assembly of the markdown report sections (up to the point of
//! PDF printing, which needs a browser).

use std::fs;

use site_audit::config::REPORT_SECTIONS;
use site_audit::report::{assemble_document, load_sections};

#[test]
fn five_minimal_sections_produce_five_anchored_containers() {
    let dir = tempfile::tempdir().unwrap();
    for (file_name, title) in REPORT_SECTIONS {
        fs::write(dir.path().join(file_name), format!("# {title}\n")).unwrap();
    }

    let sections = load_sections(dir.path()).unwrap();
    assert_eq!(sections.len(), 5);

    let document = assemble_document("www.tln-werbemittel.de", "August 05, 2026", &sections);

    assert_eq!(document.matches(r#"<div class="section""#).count(), 5);
    for i in 1..=5 {
        assert!(document.contains(&format!(r#"<div class="section" id="{i}">"#)));
    }
}

#[test]
fn toc_lists_every_section_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    for (file_name, title) in REPORT_SECTIONS {
        fs::write(dir.path().join(file_name), format!("# {title}\n")).unwrap();
    }

    let sections = load_sections(dir.path()).unwrap();
    let document = assemble_document("www.tln-werbemittel.de", "August 05, 2026", &sections);

    let mut last_position = 0;
    for (i, (_, title)) in REPORT_SECTIONS.iter().enumerate() {
        let entry = format!("{n}. <a href=\"#{n}\">{title}</a>", n = i + 1);
        let position = document
            .find(&entry)
            .unwrap_or_else(|| panic!("TOC entry missing: {entry}"));
        assert!(position > last_position, "TOC out of order at: {entry}");
        last_position = position;
    }
}

#[test]
fn missing_section_file_fails_assembly() {
    let dir = tempfile::tempdir().unwrap();
    // Write all but the last section
    for (file_name, title) in &REPORT_SECTIONS[..REPORT_SECTIONS.len() - 1] {
        fs::write(dir.path().join(file_name), format!("# {title}\n")).unwrap();
    }

    assert!(load_sections(dir.path()).is_err());
}

#[test]
fn substitutions_apply_inside_assembled_sections() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = REPORT_SECTIONS.iter();
    let (first, _) = files.next().unwrap();
    fs::write(
        dir.path().join(first),
        "# Status\n\n🔴 CRITICAL: robots.txt blocks the whole site\n\n✅ Sitemap reachable\n",
    )
    .unwrap();
    for (file_name, title) in files {
        fs::write(dir.path().join(file_name), format!("# {title}\n")).unwrap();
    }

    let sections = load_sections(dir.path()).unwrap();
    let document = assemble_document("www.tln-werbemittel.de", "August 05, 2026", &sections);

    assert!(document.contains(r#"<div class="alert alert-critical">"#));
    assert!(document.contains(r#"<span class="emoji">✅</span>"#));
    // The cover page and stylesheet are always present
    assert!(document.contains(r#"<div class="cover-page">"#));
    assert!(document.contains("Generated: August 05, 2026"));
}
