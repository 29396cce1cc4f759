//! Behavioral guarantees of the HTML analyzer over crafted documents.

use site_audit::analyze_document;

const DOMAIN: &str = "www.tln-werbemittel.de";

#[test]
fn image_counters_are_zero_for_imageless_documents() {
    let html = r#"
        <html lang="de">
            <head><title>Keine Bilder</title></head>
            <body>
                <h1>Nur Text</h1>
                <p>Dieser Abschnitt enthält keine Bilder.</p>
                <a href="/produkte">Produkte</a>
            </body>
        </html>
    "#;
    let analysis = analyze_document(html, DOMAIN);

    assert_eq!(analysis.total_images, 0);
    assert_eq!(analysis.images_without_alt, 0);
    assert_eq!(analysis.images_without_title, 0);
}

#[test]
fn malformed_json_ld_is_skipped_but_still_counted() {
    let html = r#"
        <html>
            <head>
                <script type="application/ld+json">
                    {"@context": "https://schema.org", "@type": "LocalBusiness", "name": "TLN"}
                </script>
                <script type="application/ld+json">{"@type": "Product", "name": }</script>
                <script type="application/ld+json">completely broken</script>
            </head>
            <body></body>
        </html>
    "#;
    let analysis = analyze_document(html, DOMAIN);

    // Every ld+json script tag counts, parseable or not
    assert_eq!(analysis.schema_markup_count, 3);
    // Only the well-formed block contributes a type
    assert_eq!(analysis.schema_types, vec!["LocalBusiness"]);
}

#[test]
fn link_partition_is_exhaustive_and_exclusive() {
    let html = format!(
        r##"
        <html><body>
            <a href="/impressum">Impressum</a>
            <a href="kontakt.html">Kontakt</a>
            <a href="#top">Nach oben</a>
            <a href="https://{DOMAIN}/datenschutz">Datenschutz</a>
            <a href="https://www.google.com/maps">Anfahrt</a>
            <a href="http://partner.example.org/" rel="nofollow sponsored">Partner</a>
        </body></html>
        "##
    );
    let analysis = analyze_document(&html, DOMAIN);

    assert_eq!(analysis.total_links, 6);
    assert_eq!(
        analysis.internal_links + analysis.external_links,
        analysis.total_links
    );
    assert_eq!(analysis.internal_links, 4);
    assert_eq!(analysis.external_links, 2);
    assert_eq!(analysis.nofollow_links, 1);
}

#[test]
fn every_field_degrades_on_an_empty_document() {
    let analysis = analyze_document("", DOMAIN);

    assert_eq!(analysis.title, None);
    assert_eq!(analysis.title_length, 0);
    assert!(analysis.meta_tags.is_empty());
    assert!(analysis.h1.is_empty() && analysis.h4.is_empty());
    assert_eq!(analysis.total_links, 0);
    assert_eq!(analysis.schema_markup_count, 0);
    assert!(analysis.open_graph.is_empty());
    assert!(analysis.twitter_card.is_empty());
    assert_eq!(analysis.canonical_url, None);
    assert_eq!(analysis.viewport_content, None);
    assert!(!analysis.has_favicon);
    assert_eq!(analysis.word_count, 0);
}

#[test]
fn report_serializes_to_a_flat_mapping() {
    let html = r#"
        <html lang="de">
            <head>
                <title>TLN Werbemittel</title>
                <meta name="description" content="Werbeartikel mit Logo">
                <meta property="og:title" content="TLN Werbemittel">
                <meta name="twitter:card" content="summary_large_image">
            </head>
            <body><h1>Willkommen</h1></body>
        </html>
    "#;
    let analysis = analyze_document(html, DOMAIN);
    let value = serde_json::to_value(&analysis).unwrap();

    assert_eq!(value["title"].as_str(), Some("TLN Werbemittel"));
    assert_eq!(value["title_length"].as_u64(), Some(15));
    assert_eq!(
        value["meta_tags"]["description"].as_str(),
        Some("Werbeartikel mit Logo")
    );
    assert_eq!(
        value["open_graph"]["og:title"].as_str(),
        Some("TLN Werbemittel")
    );
    assert_eq!(
        value["twitter_card"]["twitter:card"].as_str(),
        Some("summary_large_image")
    );
    assert_eq!(value["language"].as_str(), Some("de"));
}
