//! XLSX package writer.

use super::styles::StyleTable;
use super::xml::{empty, end, into_string, new_writer, start, text_element};
use crate::error::{Error, Result};
use crate::model::{Cell, CellRef, CellValue, Workbook, Worksheet};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Writer;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIP_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const WORKSHEET_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const DOC_PROPS_VT_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes";
const STYLES_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

/// Default row height in points for rows without an explicit height.
const DEFAULT_ROW_HEIGHT: &str = "15";

/// Writes a [`Workbook`] as an Office Open XML package.
pub struct XlsxWriter<'a> {
    workbook: &'a Workbook,
    styles: StyleTable,
}

impl<'a> XlsxWriter<'a> {
    /// Prepare a writer for `workbook`.
    pub fn new(workbook: &'a Workbook) -> Self {
        Self {
            workbook,
            styles: StyleTable::new(),
        }
    }

    /// Write the package to any seekable sink.
    pub fn write_to<W: Write + Seek>(mut self, sink: W) -> Result<W> {
        if self.workbook.sheets.is_empty() {
            return Err(Error::InvalidData("workbook has no worksheets".to_string()));
        }

        // Sheets first: they register the styles that styles.xml lists.
        let mut sheet_parts = Vec::with_capacity(self.workbook.sheets.len());
        for (index, sheet) in self.workbook.sheets.iter().enumerate() {
            let selected = index == self.workbook.active;
            sheet_parts.push(worksheet_xml(sheet, selected, &mut self.styles)?);
        }

        let sheet_count = self.workbook.sheets.len();
        let mut zip = ZipWriter::new(sink);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let part = |zip: &mut ZipWriter<W>, name: &str, content: &str| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
            Ok(())
        };

        part(&mut zip, "[Content_Types].xml", &content_types_xml(sheet_count))?;
        part(&mut zip, "_rels/.rels", ROOT_RELS)?;
        part(&mut zip, "docProps/app.xml", &app_xml(self.workbook)?)?;
        part(&mut zip, "docProps/core.xml", CORE_XML)?;
        part(&mut zip, "xl/workbook.xml", &workbook_xml(self.workbook)?)?;
        part(&mut zip, "xl/_rels/workbook.xml.rels", &workbook_rels_xml(sheet_count)?)?;
        part(&mut zip, "xl/styles.xml", &self.styles.to_xml()?)?;
        for (index, xml) in sheet_parts.iter().enumerate() {
            part(&mut zip, &format!("xl/worksheets/sheet{}.xml", index + 1), xml)?;
        }

        log::debug!(
            "wrote {} worksheet(s), {} cell format(s)",
            sheet_count,
            self.styles.format_count()
        );
        Ok(zip.finish()?)
    }
}

/// Serialize a workbook to XLSX bytes.
pub fn to_bytes(workbook: &Workbook) -> Result<Vec<u8>> {
    let cursor = XlsxWriter::new(workbook).write_to(Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

/// Write a workbook to an `.xlsx` file.
pub fn save(workbook: &Workbook, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    XlsxWriter::new(workbook).write_to(file)?;
    Ok(())
}

fn worksheet_xml(sheet: &Worksheet, selected: bool, styles: &mut StyleTable) -> Result<String> {
    let mut w = new_writer()?;
    w.write_event(Event::Start(BytesStart::new("worksheet").with_attributes([
        ("xmlns", SPREADSHEET_NS),
        ("xmlns:r", RELATIONSHIP_NS),
    ])))?;

    let dimension = match (sheet.max_row(), sheet.max_column()) {
        (0, _) | (_, 0) => "A1".to_string(),
        (rows, cols) => format!("A1:{}", CellRef::new(rows, cols).to_a1()),
    };
    empty(&mut w, "dimension", &[("ref", dimension.as_str())])?;

    start(&mut w, "sheetViews")?;
    if selected {
        empty(&mut w, "sheetView", &[("tabSelected", "1"), ("workbookViewId", "0")])?;
    } else {
        empty(&mut w, "sheetView", &[("workbookViewId", "0")])?;
    }
    end(&mut w, "sheetViews")?;

    empty(&mut w, "sheetFormatPr", &[("defaultRowHeight", DEFAULT_ROW_HEIGHT)])?;

    if !sheet.column_widths.is_empty() {
        start(&mut w, "cols")?;
        for (col, width) in &sheet.column_widths {
            let index = col.to_string();
            let width = width.to_string();
            empty(
                &mut w,
                "col",
                &[
                    ("min", index.as_str()),
                    ("max", index.as_str()),
                    ("width", width.as_str()),
                    ("customWidth", "1"),
                ],
            )?;
        }
        end(&mut w, "cols")?;
    }

    start(&mut w, "sheetData")?;
    let rows: BTreeSet<u32> = sheet
        .cells
        .iter()
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(cell_ref, _)| cell_ref.row)
        .chain(sheet.row_heights.keys().copied())
        .collect();
    for row in rows {
        write_row(&mut w, sheet, row, styles)?;
    }
    end(&mut w, "sheetData")?;

    if !sheet.merges.is_empty() {
        let count = sheet.merges.len().to_string();
        w.write_event(Event::Start(
            BytesStart::new("mergeCells").with_attributes([("count", count.as_str())]),
        ))?;
        for merge in &sheet.merges {
            empty(&mut w, "mergeCell", &[("ref", merge.to_a1().as_str())])?;
        }
        end(&mut w, "mergeCells")?;
    }

    empty(
        &mut w,
        "pageMargins",
        &[
            ("left", "0.75"),
            ("right", "0.75"),
            ("top", "1"),
            ("bottom", "1"),
            ("header", "0.5"),
            ("footer", "0.5"),
        ],
    )?;

    end(&mut w, "worksheet")?;
    into_string(w)
}

fn write_row(
    w: &mut Writer<Vec<u8>>,
    sheet: &Worksheet,
    row: u32,
    styles: &mut StyleTable,
) -> Result<()> {
    let index = row.to_string();
    let mut element = BytesStart::new("row").with_attributes([("r", index.as_str())]);
    let height = sheet.row_height(row).map(|h| h.to_string());
    if let Some(height) = &height {
        element.push_attribute(("ht", height.as_str()));
        element.push_attribute(("customHeight", "1"));
    }

    let cells: Vec<(&CellRef, &Cell)> = sheet.row_cells(row).collect();
    if cells.is_empty() {
        w.write_event(Event::Empty(element))?;
        return Ok(());
    }

    w.write_event(Event::Start(element))?;
    for (cell_ref, cell) in cells {
        write_cell(w, *cell_ref, cell, styles.register(&cell.style))?;
    }
    end(w, "row")
}

fn write_cell(w: &mut Writer<Vec<u8>>, cell_ref: CellRef, cell: &Cell, style_id: u32) -> Result<()> {
    let reference = cell_ref.to_a1();
    let style = style_id.to_string();
    let mut element = BytesStart::new("c").with_attributes([("r", reference.as_str())]);
    if style_id > 0 {
        element.push_attribute(("s", style.as_str()));
    }

    match &cell.value {
        None => {
            w.write_event(Event::Empty(element))?;
            Ok(())
        }
        Some(CellValue::Text(text)) => {
            element.push_attribute(("t", "inlineStr"));
            w.write_event(Event::Start(element))?;
            start(w, "is")?;
            text_element(w, "t", &[("xml:space", "preserve")], text)?;
            end(w, "is")?;
            end(w, "c")
        }
        Some(value) => {
            w.write_event(Event::Start(element))?;
            text_element(w, "v", &[], &value.to_string())?;
            end(w, "c")
        }
    }
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
    );
    for index in 1..=sheet_count {
        xml.push_str(&format!(
            "  <Override PartName=\"/xl/worksheets/sheet{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\n",
            index
        ));
    }
    xml.push_str("</Types>");
    xml
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

const CORE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:creator>tablexlsx</dc:creator>
</cp:coreProperties>"#;

fn app_xml(workbook: &Workbook) -> Result<String> {
    let mut w = new_writer()?;
    w.write_event(Event::Start(BytesStart::new("Properties").with_attributes([
        (
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        ),
        ("xmlns:vt", DOC_PROPS_VT_NS),
    ])))?;
    text_element(&mut w, "Application", &[], "tablexlsx")?;
    text_element(&mut w, "DocSecurity", &[], "0")?;

    let sheet_count = workbook.sheets.len().to_string();

    // One heading ("Worksheets") followed by the number of parts under it
    start(&mut w, "HeadingPairs")?;
    vector_start(&mut w, "2", "variant")?;
    start(&mut w, "vt:variant")?;
    text_element(&mut w, "vt:lpstr", &[], "Worksheets")?;
    end(&mut w, "vt:variant")?;
    start(&mut w, "vt:variant")?;
    text_element(&mut w, "vt:i4", &[], &sheet_count)?;
    end(&mut w, "vt:variant")?;
    end(&mut w, "vt:vector")?;
    end(&mut w, "HeadingPairs")?;

    start(&mut w, "TitlesOfParts")?;
    vector_start(&mut w, &sheet_count, "lpstr")?;
    for sheet in &workbook.sheets {
        text_element(&mut w, "vt:lpstr", &[], &sheet.title)?;
    }
    end(&mut w, "vt:vector")?;
    end(&mut w, "TitlesOfParts")?;

    end(&mut w, "Properties")?;
    into_string(w)
}

fn vector_start(w: &mut Writer<Vec<u8>>, size: &str, base_type: &str) -> Result<()> {
    w.write_event(Event::Start(
        BytesStart::new("vt:vector").with_attributes([("size", size), ("baseType", base_type)]),
    ))?;
    Ok(())
}

fn workbook_xml(workbook: &Workbook) -> Result<String> {
    let mut w = new_writer()?;
    w.write_event(Event::Start(BytesStart::new("workbook").with_attributes([
        ("xmlns", SPREADSHEET_NS),
        ("xmlns:r", RELATIONSHIP_NS),
    ])))?;

    let active = workbook.active.to_string();
    start(&mut w, "bookViews")?;
    empty(&mut w, "workbookView", &[("activeTab", active.as_str())])?;
    end(&mut w, "bookViews")?;

    start(&mut w, "sheets")?;
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        let sheet_id = (index + 1).to_string();
        let rel_id = format!("rId{}", index + 1);
        empty(
            &mut w,
            "sheet",
            &[
                ("name", sheet.title.as_str()),
                ("sheetId", sheet_id.as_str()),
                ("r:id", rel_id.as_str()),
            ],
        )?;
    }
    end(&mut w, "sheets")?;

    end(&mut w, "workbook")?;
    into_string(w)
}

fn workbook_rels_xml(sheet_count: usize) -> Result<String> {
    let mut w = new_writer()?;
    w.write_event(Event::Start(
        BytesStart::new("Relationships").with_attributes([("xmlns", PACKAGE_RELS_NS)]),
    ))?;
    for index in 1..=sheet_count {
        let id = format!("rId{}", index);
        let target = format!("worksheets/sheet{}.xml", index);
        empty(
            &mut w,
            "Relationship",
            &[("Id", id.as_str()), ("Type", WORKSHEET_REL), ("Target", target.as_str())],
        )?;
    }
    let styles_id = format!("rId{}", sheet_count + 1);
    empty(
        &mut w,
        "Relationship",
        &[("Id", styles_id.as_str()), ("Type", STYLES_REL), ("Target", "styles.xml")],
    )?;
    end(&mut w, "Relationships")?;
    into_string(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Border, Font, MergeRange, Side, Style};
    use std::io::Read;

    fn sample_workbook() -> Workbook {
        let mut wb = Workbook::with_sheet_title("Report");
        let sheet = wb.active_mut();
        sheet.set_value(CellRef::new(1, 1), "Name & Co").unwrap();
        sheet.set_value(CellRef::new(2, 1), 42i64).unwrap();
        sheet.set_value(CellRef::new(2, 2), 1.5).unwrap();
        sheet.merge(MergeRange::new(CellRef::new(1, 1), CellRef::new(1, 2))).unwrap();
        sheet.set_style(
            CellRef::new(1, 1),
            Style::new().with_font(Font::bold()).with_border(Border::top(Side::thin())),
        );
        sheet.set_column_width(1, 20.0);
        sheet.set_row_height(3, 30.0);
        wb
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_parts() {
        let bytes = to_bytes(&sample_workbook()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_worksheet_content() {
        let bytes = to_bytes(&sample_workbook()).unwrap();
        let xml = read_part(&bytes, "xl/worksheets/sheet1.xml");

        assert!(xml.contains(r#"<dimension ref="A1:B2"/>"#));
        assert!(xml.contains(r#"<col min="1" max="1" width="20" customWidth="1"/>"#));
        assert!(xml.contains(r#"<c r="A1" s="1" t="inlineStr"><is><t xml:space="preserve">Name &amp; Co</t></is></c>"#));
        assert!(xml.contains(r#"<c r="A2"><v>42</v></c>"#));
        assert!(xml.contains(r#"<c r="B2"><v>1.5</v></c>"#));
        assert!(xml.contains(r#"<row r="3" ht="30" customHeight="1"/>"#));
        assert!(xml.contains(r#"<mergeCells count="1"><mergeCell ref="A1:B1"/></mergeCells>"#));
    }

    #[test]
    fn test_workbook_lists_sheet_title() {
        let bytes = to_bytes(&sample_workbook()).unwrap();
        let xml = read_part(&bytes, "xl/workbook.xml");
        assert!(xml.contains(r#"<sheet name="Report" sheetId="1" r:id="rId1"/>"#));

        let rels = read_part(&bytes, "xl/_rels/workbook.xml.rels");
        assert!(rels.contains(r#"Target="styles.xml""#));
    }

    #[test]
    fn test_app_properties_list_sheets() {
        let bytes = to_bytes(&sample_workbook()).unwrap();
        let xml = read_part(&bytes, "docProps/app.xml");

        assert!(xml.contains(r#"<vt:i4>1</vt:i4>"#));
        assert!(xml.contains(
            r#"<TitlesOfParts><vt:vector size="1" baseType="lpstr"><vt:lpstr>Report</vt:lpstr></vt:vector></TitlesOfParts>"#
        ));
        assert!(xml.contains(r#"<HeadingPairs><vt:vector size="2" baseType="variant">"#));
    }

    #[test]
    fn test_empty_workbook_rejected() {
        let wb = Workbook {
            sheets: Vec::new(),
            active: 0,
        };
        assert!(matches!(to_bytes(&wb), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        save(&sample_workbook(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
