//! Small helpers over `quick_xml::Writer`.

use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// A writer with the standalone UTF-8 declaration already emitted.
pub fn new_writer() -> Result<Writer<Vec<u8>>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

/// Open an element without attributes.
pub fn start(w: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

/// Close an element.
pub fn end(w: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write a self-closing element.
pub fn empty(w: &mut Writer<Vec<u8>>, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    w.write_event(Event::Empty(element))?;
    Ok(())
}

/// Write `<name attrs>text</name>` with the text escaped.
pub fn text_element(
    w: &mut Writer<Vec<u8>>,
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    w.write_event(Event::Start(element))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, name)
}

/// Finish a writer and return its document.
pub fn into_string(w: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(w.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let mut w = new_writer().unwrap();
        text_element(&mut w, "t", &[("xml:space", "preserve")], "a < b & c").unwrap();
        let xml = into_string(w).unwrap();
        assert!(xml.ends_with(r#"<t xml:space="preserve">a &lt; b &amp; c</t>"#));
    }

    #[test]
    fn test_attributes_are_escaped() {
        let mut w = Writer::new(Vec::new());
        empty(&mut w, "sheet", &[("name", "R&D \"Q1\"")]).unwrap();
        let xml = into_string(w).unwrap();
        assert_eq!(xml, r#"<sheet name="R&amp;D &quot;Q1&quot;"/>"#);
    }
}
