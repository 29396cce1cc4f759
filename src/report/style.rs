//! Print stylesheet embedded in the assembled document.

/// A4 print styling: page counter, cover/TOC layout, forced page breaks
/// before top-level sections, and table/code/blockquote/alert styling.
pub(crate) const REPORT_CSS: &str = r#"
@page {
    size: A4;
    margin: 2cm;
    @bottom-center {
        content: counter(page);
    }
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    line-height: 1.6;
    color: #333;
    max-width: 100%;
}

.cover-page {
    page-break-after: always;
    text-align: center;
    padding-top: 200px;
}

.cover-page h1 {
    font-size: 36px;
    margin-bottom: 20px;
    color: #2c3e50;
}

.cover-page h2 {
    font-size: 24px;
    color: #7f8c8d;
    font-weight: normal;
}

.cover-page .date {
    margin-top: 100px;
    font-size: 16px;
    color: #95a5a6;
}

.toc {
    page-break-after: always;
}

.toc h2 {
    color: #2c3e50;
    border-bottom: 2px solid #3498db;
    padding-bottom: 10px;
}

.toc ul {
    list-style: none;
    padding-left: 0;
}

.toc li {
    margin: 15px 0;
    font-size: 16px;
}

.toc a {
    text-decoration: none;
    color: #34495e;
}

.section {
    page-break-before: always;
}

h1 {
    color: #2c3e50;
    border-bottom: 3px solid #3498db;
    padding-bottom: 10px;
    margin-top: 0;
    page-break-after: avoid;
}

h2 {
    color: #34495e;
    margin-top: 30px;
    page-break-after: avoid;
}

h3 {
    color: #7f8c8d;
    margin-top: 20px;
    page-break-after: avoid;
}

table {
    border-collapse: collapse;
    width: 100%;
    margin: 20px 0;
    page-break-inside: avoid;
}

th {
    background-color: #3498db;
    color: white;
    padding: 12px;
    text-align: left;
}

td {
    padding: 10px;
    border-bottom: 1px solid #ecf0f1;
}

tr:nth-child(even) {
    background-color: #f8f9fa;
}

code {
    background-color: #f4f4f4;
    padding: 2px 5px;
    border-radius: 3px;
    font-family: 'Courier New', monospace;
    font-size: 0.9em;
}

pre {
    background-color: #f4f4f4;
    padding: 15px;
    border-radius: 5px;
    overflow-x: auto;
    page-break-inside: avoid;
}

pre code {
    background-color: transparent;
    padding: 0;
}

blockquote {
    border-left: 4px solid #3498db;
    padding-left: 20px;
    margin-left: 0;
    color: #555;
    font-style: italic;
}

ul, ol {
    margin-left: 20px;
}

li {
    margin: 5px 0;
}

.alert {
    padding: 15px;
    margin: 20px 0;
    border-radius: 5px;
    page-break-inside: avoid;
}

.alert-critical {
    background-color: #ffe4e1;
    border-left: 5px solid #dc3545;
}

.alert-warning {
    background-color: #fff3cd;
    border-left: 5px solid #ffc107;
}

.alert-success {
    background-color: #d4edda;
    border-left: 5px solid #28a745;
}

hr {
    border: none;
    border-top: 2px solid #ecf0f1;
    margin: 30px 0;
}

strong {
    color: #2c3e50;
}

.emoji {
    font-size: 1.2em;
}
"#;
