//! quick-xml backed document builder

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::node::{Content, Document, ElementData};
use crate::config::{CompatibilityMode, XmlPathConfig};
use crate::path::error::{PathError, PathResult};

/// HTML elements that never have content or an end tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements a `<p>` start or block start implicitly closes an open `<p>` for
const CLOSES_PARAGRAPH: [&str; 18] = [
    "address", "article", "aside", "blockquote", "div", "dl", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "ol", "p", "ul",
];

/// Named HTML entities beyond the five XML ones
fn html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "middot" => "\u{b7}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "cent" => "\u{a2}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "euro" => "\u{20ac}",
        _ => return None,
    })
}

/// Whether an open `open` element ends when an `incoming` element starts
fn closes_implicitly(open: &str, incoming: &str) -> bool {
    match open {
        "p" => CLOSES_PARAGRAPH.contains(&incoming),
        "li" => incoming == "li",
        "option" => matches!(incoming, "option" | "optgroup"),
        "dt" | "dd" => matches!(incoming, "dt" | "dd"),
        "td" | "th" => matches!(incoming, "td" | "th" | "tr"),
        "tr" => incoming == "tr",
        _ => false,
    }
}

/// In-scope namespace bindings; the empty prefix is the default namespace
#[derive(Default)]
struct NamespaceScope {
    bindings: Vec<(String, String)>,
}

impl NamespaceScope {
    fn resolve(&self, prefix: &str) -> Option<String> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == prefix)
            .map(|(_, uri)| uri.clone())
            .filter(|uri| !uri.is_empty())
    }
}

struct Builder {
    elements: Vec<ElementData>,
    open: Vec<(usize, usize)>,
    scope: NamespaceScope,
    namespace_aware: bool,
    html: bool,
}

impl Builder {
    fn element_name(&self, raw: &[u8], position: usize) -> PathResult<String> {
        let name = String::from_utf8(raw.to_vec()).map_err(|_| xml_error("element name is not valid UTF-8", position))?;
        Ok(if self.html { name.to_ascii_lowercase() } else { name })
    }

    fn attributes(&self, start: &BytesStart<'_>, position: usize) -> PathResult<Vec<(String, String)>> {
        if !self.html {
            return start
                .attributes()
                .map(|attribute| {
                    let attribute = attribute.map_err(|e| xml_error(&e.to_string(), position))?;
                    let value = attribute
                        .unescape_value()
                        .map_err(|e| xml_error(&e.to_string(), position))?
                        .into_owned();
                    Ok((String::from_utf8_lossy(attribute.key.as_ref()).into_owned(), value))
                })
                .collect();
        }
        Ok(start
            .html_attributes()
            .filter_map(|attribute| match attribute {
                Ok(attribute) => Some(attribute),
                Err(e) => {
                    tracing::trace!(target: "restcheck::xml", position, error = %e, "skipping malformed HTML attribute");
                    None
                }
            })
            .map(|attribute| {
                let key = String::from_utf8_lossy(attribute.key.as_ref()).to_ascii_lowercase();
                (key, lenient_attribute_value(&attribute))
            })
            .collect())
    }

    fn open_element(&mut self, start: &BytesStart<'_>, position: usize) -> PathResult<usize> {
        let qualified_name = self.element_name(start.name().as_ref(), position)?;
        if self.html {
            while self
                .open
                .last()
                .is_some_and(|(index, _)| closes_implicitly(&self.elements[*index].qualified_name, &qualified_name))
            {
                self.close_element();
            }
        }
        let mark = self.scope.bindings.len();

        let mut attributes = IndexMap::new();
        for (key, value) in self.attributes(start, position)? {
            let declared_prefix = if key == "xmlns" {
                Some(String::new())
            } else {
                key.strip_prefix("xmlns:").map(str::to_string)
            };
            match declared_prefix {
                Some(prefix) => {
                    self.scope.bindings.push((prefix, value.clone()));
                    if !self.namespace_aware {
                        attributes.insert(key, value);
                    }
                }
                None => {
                    attributes.insert(key, value);
                }
            }
        }

        let (prefix, local) = qualified_name
            .split_once(':')
            .map_or(("", qualified_name.as_str()), |(p, l)| (p, l));
        let (name, namespace) = if self.namespace_aware {
            (local.to_string(), self.scope.resolve(prefix))
        } else {
            (qualified_name.clone(), None)
        };

        let mut parent = self.open.last().map(|(index, _)| *index);
        if parent.is_none() && !self.elements.is_empty() {
            if !self.html {
                return Err(xml_error("document has more than one root element", position));
            }
            // stray top-level HTML elements are adopted by the first root
            parent = Some(0);
        }
        let index = self.elements.len();
        self.elements.push(ElementData {
            name,
            qualified_name,
            namespace,
            attributes,
            content: Vec::new(),
            parent,
        });
        if let Some(parent) = parent {
            self.elements[parent].content.push(Content::Element(index));
        }
        self.open.push((index, mark));
        Ok(index)
    }

    fn close_element(&mut self) {
        if let Some((_, mark)) = self.open.pop() {
            self.scope.bindings.truncate(mark);
        }
    }

    /// Close up to and including the innermost open element named like `end`;
    /// end tags matching nothing open are dropped
    fn close_matching(&mut self, end: &BytesEnd<'_>, position: usize) -> PathResult<()> {
        let name = self.element_name(end.name().as_ref(), position)?;
        match self
            .open
            .iter()
            .rposition(|(index, _)| self.elements[*index].qualified_name == name)
        {
            Some(depth) => {
                while self.open.len() > depth {
                    self.close_element();
                }
            }
            None => tracing::trace!(target: "restcheck::xml", position, name = %name, "ignoring unmatched end tag"),
        }
        Ok(())
    }

    fn text(&self, text: &BytesText<'_>, position: usize) -> PathResult<String> {
        if !self.html {
            return text
                .unescape()
                .map(Cow::into_owned)
                .map_err(|e| xml_error(&e.to_string(), position));
        }
        Ok(text
            .unescape_with(html_entity)
            .map_or_else(|_| String::from_utf8_lossy(text).into_owned(), Cow::into_owned))
    }

    fn push_text(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        if let Some((index, _)) = self.open.last() {
            self.elements[*index].content.push(Content::Text(text));
        }
    }
}

/// Attribute value with HTML entities resolved, or as written when it does not unescape
fn lenient_attribute_value(attribute: &Attribute<'_>) -> String {
    attribute
        .unescape_value_with(html_entity)
        .map_or_else(|_| String::from_utf8_lossy(&attribute.value).into_owned(), Cow::into_owned)
}

fn xml_error(reason: &str, position: usize) -> PathError {
    tracing::debug!(target: "restcheck::xml", position, reason, "XML parse failure");
    PathError::invalid_xml(format!("Failed to parse the XML document: {reason} at position {position}"))
}

/// Parse `text` into an element arena
///
/// Whitespace-only text between elements is dropped; any other text is kept
/// verbatim. In [`CompatibilityMode::Html`] tag and attribute names are
/// lowercased and malformed markup is repaired instead of rejected.
pub(crate) fn parse_document(text: &str, config: &XmlPathConfig) -> PathResult<Arc<Document>> {
    let html = config.compatibility_mode() == CompatibilityMode::Html;
    let mut reader = Reader::from_str(text);
    reader.check_end_names(!html);
    let mut builder = Builder {
        elements: Vec::new(),
        open: Vec::new(),
        scope: NamespaceScope::default(),
        namespace_aware: config.is_namespace_aware(),
        html,
    };

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                builder.open_element(&start, position)?;
                if html && VOID_ELEMENTS.contains(&builder.element_name(start.name().as_ref(), position)?.as_str()) {
                    builder.close_element();
                }
            }
            Ok(Event::Empty(start)) => {
                builder.open_element(&start, position)?;
                builder.close_element();
            }
            Ok(Event::End(end)) => {
                if html {
                    builder.close_matching(&end, position)?;
                } else {
                    builder.close_element();
                }
            }
            Ok(Event::Text(text)) => {
                let text = builder.text(&text, position)?;
                builder.push_text(text);
            }
            Ok(Event::CData(data)) => {
                builder.push_text(String::from_utf8_lossy(&data.into_inner()).into_owned());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(&e.to_string(), reader.buffer_position())),
        }
    }

    if builder.elements.is_empty() {
        return Err(xml_error("document has no root element", reader.buffer_position()));
    }
    if !builder.open.is_empty() {
        if !html {
            return Err(xml_error("unexpected end of document", reader.buffer_position()));
        }
        while !builder.open.is_empty() {
            builder.close_element();
        }
    }

    Ok(Arc::new(Document {
        elements: builder.elements,
        namespace_aware: config.is_namespace_aware(),
        declared_namespaces: config.declared_namespaces().clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::node::Node;

    fn xml() -> XmlPathConfig {
        XmlPathConfig::new()
    }

    fn html() -> XmlPathConfig {
        XmlPathConfig::new().with_compatibility_mode(CompatibilityMode::Html)
    }

    #[test]
    fn keeps_significant_whitespace_and_drops_indentation() {
        let doc = parse_document("<foo>\n  <bar>sudo </bar>\n</foo>", &xml())
            .expect("well-formed XML");
        let root = Node::root(doc);
        assert_eq!(root.children().size(), 1);
        assert_eq!(root.value(), "sudo ");
    }

    #[test]
    fn resolves_namespaces_when_aware() {
        let source = r#"<x:response xmlns:x="http://something.com/test"><x:item/><item/></x:response>"#;
        let doc = parse_document(source, &xml()).expect("well-formed XML");
        let root = Node::root(doc);
        assert_eq!(root.name(), "response");
        assert_eq!(root.namespace(), Some("http://something.com/test"));
        assert!(root.attributes().is_empty());
        let children = root.children();
        assert_eq!(children.get(1).and_then(Node::namespace), None);
    }

    #[test]
    fn keeps_qualified_names_when_not_aware() {
        let source = r#"<ns1:a xmlns:ns1="urn:one"><ns1:b>x</ns1:b></ns1:a>"#;
        let doc = parse_document(source, &xml().with_namespace_aware(false)).expect("well-formed XML");
        let root = Node::root(doc);
        assert_eq!(root.name(), "ns1:a");
        assert_eq!(root.get_attribute("@xmlns:ns1").as_deref(), Some("urn:one"));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(parse_document("<a><b></a>", &xml()).is_err());
        assert!(parse_document("", &xml()).is_err());
        assert!(parse_document("<a>", &xml()).is_err());
    }

    #[test]
    fn html_void_elements_and_unclosed_tags() {
        let doc = parse_document("<!DOCTYPE html><HTML><body><p>hi<br><IMG SRC=a.png alt>there<p>next</body>", &html())
            .expect("tag soup");
        let root = Node::root(doc);
        assert_eq!(root.name(), "html");
        let body = root.children().get(0).cloned().expect("body");
        let paragraphs = body.children();
        assert_eq!(paragraphs.size(), 2);
        let first = paragraphs.get(0).expect("first paragraph");
        assert_eq!(first.value(), "hithere");
        assert_eq!(first.children().size(), 2);
        assert_eq!(first.children().get(1).and_then(|img| img.get_attribute("@src")).as_deref(), Some("a.png"));
        assert_eq!(paragraphs.get(1).map(Node::value).as_deref(), Some("next"));
    }

    #[test]
    fn html_mismatched_end_tags_and_entities() {
        let doc = parse_document("<div><b>bold<i>both</b>&nbsp;x</i></span><em>&bogus;</em></div>", &html())
            .expect("tag soup");
        let root = Node::root(doc);
        assert_eq!(root.children().size(), 2);
        assert_eq!(root.value(), "boldboth\u{a0}x&bogus;");
        assert!(parse_document("<div>&nbsp;</div>", &xml()).is_err());
    }
}
