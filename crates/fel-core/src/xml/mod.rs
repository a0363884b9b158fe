//! Namespace-aware XML element tree.
//!
//! Invoice documents are small, so the whole document is read into an
//! owned tree with quick-xml's [`NsReader`]. Elements are identified by
//! namespace URI and local name; the prefix a document happens to use is
//! irrelevant. Text and attribute values are decoded with the encoding
//! the XML declaration names, UTF-8 when there is none.

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::error::ExtractionError;

/// Namespace of FEL 0.2.0 documents issued through SAT Guatemala.
pub const FEL_NAMESPACE: &str = "http://www.sat.gob.gt/dte/fel/0.2.0";

type Result<T> = std::result::Result<T, ExtractionError>;

/// An XML element with its attributes, direct text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Parse a complete document and return its root element.
    ///
    /// Fails with [`ExtractionError::MalformedXml`] on any well-formedness
    /// problem: syntax errors, mismatched or unclosed tags, unbound
    /// prefixes, missing or multiple root elements and character data
    /// outside the root.
    pub fn parse(xml: &[u8]) -> Result<Element> {
        let mut reader = NsReader::from_reader(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            buf.clear();
            let (resolved, event) = match reader.read_resolved_event_into(&mut buf) {
                Ok(pair) => pair,
                Err(e) => return Err(malformed(e)),
            };

            match event {
                Event::Start(start) => {
                    let namespace = owned_namespace(resolved)?;
                    stack.push(Element::open(namespace, &start, reader.decoder())?);
                }
                Event::Empty(start) => {
                    let namespace = owned_namespace(resolved)?;
                    let element = Element::open(namespace, &start, reader.decoder())?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| malformed("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(malformed)?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(data) => {
                    let text = reader.decoder().decode(&data).map_err(malformed)?;
                    push_text(&mut stack, &text)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype.
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(malformed(format!("unclosed element <{}>", open.name)));
        }

        root.ok_or_else(|| malformed("document has no root element"))
    }

    fn open(
        namespace: Option<String>,
        start: &BytesStart<'_>,
        decoder: Decoder,
    ) -> Result<Element> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            // xmlns declarations are consumed by the reader's resolver.
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(malformed)?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Element {
            namespace,
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Local name of the element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI, if the element is in one.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Whether this element is `{namespace}name`.
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// Look up an unqualified attribute by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Look up an attribute, falling back to `default` when it is absent.
    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    /// Character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Direct children in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child named `{namespace}name`.
    pub fn child(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(namespace, name))
    }

    /// All descendants (not including `self`) in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant named `{namespace}name`.
    pub fn find(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.descendants().find(|e| e.is(namespace, name))
    }

    /// Every descendant named `{namespace}name`, in document order.
    pub fn find_all<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.is(namespace, name))
    }
}

/// Pre-order iterator over the descendants of an [`Element`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn owned_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(malformed(format!(
            "unbound namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(malformed("more than one root element")),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(current) => current.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(malformed("character data outside the root element")),
    }
    Ok(())
}

fn malformed(err: impl ToString) -> ExtractionError {
    ExtractionError::MalformedXml(err.to_string())
}
