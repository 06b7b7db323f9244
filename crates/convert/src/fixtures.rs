//! Test fixtures generated on the fly.

use lopdf::{dictionary, Document, Object};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

pub const PRESENTATION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/></p:sldIdLst>
</p:presentation>"#;

pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// A minimal two-slide PPTX package.
pub fn write_pptx(path: &Path) {
    write_zip(
        path,
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("ppt/presentation.xml", PRESENTATION_XML),
            ("ppt/slides/slide1.xml", "<p:sld/>"),
        ],
    );
}

pub fn write_compound(path: &Path) {
    let mut comp = cfb::create(path).unwrap();
    for name in ["/PowerPoint Document", "/Current User"] {
        let mut stream = comp.create_stream(name).unwrap();
        stream.write_all(&[0u8; 16]).unwrap();
    }
    comp.flush().unwrap();
}

pub fn write_pdf(path: &Path, pages: usize) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }))
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
