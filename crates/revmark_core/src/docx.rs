//! WordprocessingML rendering of a revised document.
//!
//! Produces every part of a minimal `.docx` package:
//!
//! | Part | Purpose |
//! |------|---------|
//! | `[Content_Types].xml` | MIME type of each part |
//! | `_rels/.rels` | package root -> main document, core properties |
//! | `word/document.xml` | paragraphs, runs and revision marks |
//! | `word/_rels/document.xml.rels` | main document -> styles, settings |
//! | `word/styles.xml` | default paragraph and character style |
//! | `word/settings.xml` | keeps track changes switched on |
//! | `docProps/core.xml` | creator and timestamps |
//!
//! Unchanged runs are plain `w:r` elements, inserted runs sit in `w:ins`,
//! deleted runs sit in `w:del` and carry their text in `w:delText`.
//! Whole-paragraph insertions and deletions also mark the paragraph mark
//! itself through `w:pPr/w:rPr`.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::package::Parts;
use crate::revision::{ParagraphMark, RevisedDocument, RevisedParagraph, Revision, Run, RunKind};
use crate::xml::{escape, needs_preserve};

/// MIME type of a `.docx` file.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_SETTINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";

/// Path of the content-types part
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
/// Path of the package relationships part
pub const ROOT_RELS_PART: &str = "_rels/.rels";
/// Path of the main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Path of the main document's relationships part
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
/// Path of the styles part
pub const STYLES_PART: &str = "word/styles.xml";
/// Path of the settings part
pub const SETTINGS_PART: &str = "word/settings.xml";
/// Path of the core properties part
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// XML parts other than relationships, with their content types.
const OVERRIDES: &[(&str, &str)] = &[
    (
        DOCUMENT_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    ),
    (
        STYLES_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
    ),
    (
        SETTINGS_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
    ),
    (
        CORE_PROPERTIES_PART,
        "application/vnd.openxmlformats-package.core-properties+xml",
    ),
];

/// Render every package part for `doc`, in archive order.
pub fn build(doc: &RevisedDocument) -> Result<Parts> {
    let mut parts = Parts::new();
    parts.insert(CONTENT_TYPES_PART.to_string(), content_types().into_bytes());
    parts.insert(ROOT_RELS_PART.to_string(), root_relationships().into_bytes());
    parts.insert(DOCUMENT_PART.to_string(), document_xml(doc)?.into_bytes());
    parts.insert(
        DOCUMENT_RELS_PART.to_string(),
        document_relationships().into_bytes(),
    );
    parts.insert(STYLES_PART.to_string(), styles_xml().into_bytes());
    parts.insert(SETTINGS_PART.to_string(), settings_xml().into_bytes());
    parts.insert(
        CORE_PROPERTIES_PART.to_string(),
        core_properties(&doc.author, doc.timestamp)?.into_bytes(),
    );
    Ok(parts)
}

/// Revision timestamps are written in UTC with second precision.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn content_types() -> String {
    let mut xml = format!(
        r#"{XML_DECLARATION}<Types xmlns="{NS_CONTENT_TYPES}"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#
    );
    for (part, content_type) in OVERRIDES {
        xml.push_str(&format!(
            r#"<Override PartName="/{part}" ContentType="{content_type}"/>"#
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn relationships(entries: &[(&str, &str)]) -> String {
    let mut xml = format!(r#"{XML_DECLARATION}<Relationships xmlns="{NS_PACKAGE_RELS}">"#);
    for (i, (rel_type, target)) in entries.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{rel_type}" Target="{target}"/>"#,
            i + 1
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn root_relationships() -> String {
    relationships(&[
        (REL_OFFICE_DOCUMENT, DOCUMENT_PART),
        (REL_CORE_PROPERTIES, CORE_PROPERTIES_PART),
    ])
}

fn document_relationships() -> String {
    // Targets are relative to word/
    relationships(&[(REL_STYLES, "styles.xml"), (REL_SETTINGS, "settings.xml")])
}

fn document_xml(doc: &RevisedDocument) -> Result<String> {
    let mut xml = format!(
        r#"{XML_DECLARATION}<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}"><w:body>"#
    );
    for paragraph in &doc.paragraphs {
        xml.push_str(&paragraph_xml(paragraph)?);
    }
    // US Letter, one-inch margins
    xml.push_str(concat!(
        r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
        r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
        r#"</w:sectPr></w:body></w:document>"#
    ));
    Ok(xml)
}

fn paragraph_xml(paragraph: &RevisedParagraph) -> Result<String> {
    let mut xml = String::from("<w:p>");

    match &paragraph.mark {
        ParagraphMark::Unchanged => {}
        ParagraphMark::Inserted(rev) => xml.push_str(&format!(
            "<w:pPr><w:rPr><w:ins {}/></w:rPr></w:pPr>",
            revision_attrs(rev)?
        )),
        ParagraphMark::Deleted(rev) => xml.push_str(&format!(
            "<w:pPr><w:rPr><w:del {}/></w:rPr></w:pPr>",
            revision_attrs(rev)?
        )),
    }

    for run in paragraph.runs.iter().filter(|r| !r.text.is_empty()) {
        xml.push_str(&run_xml(run)?);
    }

    xml.push_str("</w:p>");
    Ok(xml)
}

fn run_xml(run: &Run) -> Result<String> {
    let text_tag = if run.kind == RunKind::Deleted {
        "w:delText"
    } else {
        "w:t"
    };
    let body = format!("<w:r>{}</w:r>", run_content(&run.text, text_tag)?);

    match (run.kind, &run.revision) {
        (RunKind::Inserted, Some(rev)) => {
            Ok(format!("<w:ins {}>{body}</w:ins>", revision_attrs(rev)?))
        }
        (RunKind::Deleted, Some(rev)) => {
            Ok(format!("<w:del {}>{body}</w:del>", revision_attrs(rev)?))
        }
        _ => Ok(body),
    }
}

/// Text of one run as text, break and tab elements.
fn run_content(text: &str, text_tag: &str) -> Result<String> {
    let mut xml = String::new();
    let mut segment = String::new();

    let flush = |segment: &mut String, xml: &mut String| -> Result<()> {
        if !segment.is_empty() {
            let space = if needs_preserve(segment) {
                r#" xml:space="preserve""#
            } else {
                ""
            };
            xml.push_str(&format!("<{text_tag}{space}>{}</{text_tag}>", escape(segment)?));
            segment.clear();
        }
        Ok(())
    };

    for ch in text.chars() {
        match ch {
            '\n' => {
                flush(&mut segment, &mut xml)?;
                xml.push_str("<w:br/>");
            }
            '\t' => {
                flush(&mut segment, &mut xml)?;
                xml.push_str("<w:tab/>");
            }
            // Line endings are carried by the break that follows
            '\r' => {}
            c => segment.push(c),
        }
    }
    flush(&mut segment, &mut xml)?;
    Ok(xml)
}

fn revision_attrs(rev: &Revision) -> Result<String> {
    Ok(format!(
        r#"w:id="{}" w:author="{}" w:date="{}""#,
        rev.id,
        escape(&rev.author)?,
        format_date(rev.date)
    ))
}

fn styles_xml() -> String {
    format!(
        concat!(
            r#"{decl}<w:styles xmlns:w="{ns}">"#,
            r#"<w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="Times New Roman" w:eastAsia="Times New Roman" w:hAnsi="Times New Roman" w:cs="Times New Roman"/>"#,
            r#"<w:sz w:val="24"/><w:szCs w:val="24"/><w:lang w:val="en-US"/>"#,
            r#"</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>"#,
            r#"<w:spacing w:after="200" w:line="276" w:lineRule="auto"/>"#,
            r#"</w:pPr></w:pPrDefault></w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
            r#"<w:style w:type="character" w:default="1" w:styleId="DefaultParagraphFont"><w:name w:val="Default Paragraph Font"/><w:uiPriority w:val="1"/><w:semiHidden/><w:unhideWhenUsed/></w:style>"#,
            r#"</w:styles>"#
        ),
        decl = XML_DECLARATION,
        ns = NS_W
    )
}

fn settings_xml() -> String {
    format!(
        concat!(
            r#"{decl}<w:settings xmlns:w="{ns}">"#,
            r#"<w:trackRevisions/><w:defaultTabStop w:val="720"/>"#,
            r#"<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#,
            r#"</w:settings>"#
        ),
        decl = XML_DECLARATION,
        ns = NS_W
    )
}

fn core_properties(author: &str, timestamp: DateTime<Utc>) -> Result<String> {
    let author = escape(author)?;
    let date = format_date(timestamp);
    Ok(format!(
        concat!(
            r#"{decl}<cp:coreProperties"#,
            r#" xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
            r#" xmlns:dc="http://purl.org/dc/elements/1.1/""#,
            r#" xmlns:dcterms="http://purl.org/dc/terms/""#,
            r#" xmlns:dcmitype="http://purl.org/dc/dcmitype/""#,
            r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            r#"<dc:creator>{author}</dc:creator><cp:lastModifiedBy>{author}</cp:lastModifiedBy>"#,
            r#"<cp:revision>1</cp:revision>"#,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{date}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{date}</dcterms:modified>"#,
            r#"</cp:coreProperties>"#
        ),
        decl = XML_DECLARATION,
        author = author,
        date = date
    ))
}
