//! Reading and writing a small subset of HTML-like markup.
//!
//! The reader is lenient in the ways hand-written pages need (implicit closes for paragraphs
//! and list items, unclosed elements at end of input, a `<` that starts no tag) and strict
//! about input it cannot make sense of: unterminated tags and comments, and closing tags
//! with no matching open element.

use tracing::debug;

use crate::{
    document::Document,
    error::TreeError,
    node::{Element, NodeData, NodeId},
    tree::ContentTree,
};

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is kept verbatim up to the matching closing tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements implicitly closed by an opening tag of the same name.
const SELF_CLOSING_SIBLINGS: &[&str] = &["p", "li", "dt", "dd", "tr", "td", "th", "option"];

/// Longest entity reference recognised, including `&` and `;`.
const MAX_ENTITY_LEN: usize = 12;

/// Parses markup into a [`Document`] with the default exclusion rules.
pub fn parse_markup(input: &str) -> Result<Document, TreeError> {
    let mut parser = Parser {
        input,
        pos: 0,
        doc: Document::new(),
        open: Vec::new(),
    };
    parser.run()?;
    debug!(
        bytes = input.len(),
        nodes = parser.doc.node_count(),
        has_body = parser.doc.body().is_some(),
        "parsed markup"
    );
    Ok(parser.doc)
}

impl Document {
    /// Serializes the attached part of the document back to markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.document_node()) {
            self.write_markup(child, &mut out);
        }
        out
    }

    /// Appends the markup for `node` and its subtree to `out`.
    pub fn write_markup(&self, node: NodeId, out: &mut String) {
        match self.data(node) {
            None => {}
            Some(NodeData::Text(text)) => {
                let raw = self
                    .parent(node)
                    .and_then(|p| self.element(p))
                    .is_some_and(|el| RAW_TEXT_ELEMENTS.contains(&el.name.as_str()));
                if raw {
                    out.push_str(text);
                } else {
                    escape_into(text, false, out);
                }
            }
            Some(NodeData::Element(element)) => {
                write_open_tag(element, out);
                let children = self.children(node);
                if children.is_empty() && VOID_ELEMENTS.contains(&element.name.as_str()) {
                    return;
                }
                for child in children {
                    self.write_markup(child, out);
                }
                out.push_str("</");
                out.push_str(&element.name);
                out.push('>');
            }
        }
    }
}

/// Writes `<name class="..." attr="...">`.
fn write_open_tag(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    if !element.classes.is_empty() {
        out.push_str(" class=\"");
        escape_into(&element.classes.join(" "), true, out);
        out.push('"');
    }
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');
}

/// Escapes markup-significant characters.
fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

/// Returns true if `rest` begins something the reader treats as markup rather than text.
fn is_tag_start(rest: &str) -> bool {
    let mut bytes = rest.bytes();
    if bytes.next() != Some(b'<') {
        return false;
    }
    match bytes.next() {
        Some(b'!' | b'?') => true,
        Some(b'/') => bytes.next().is_some_and(|b| b.is_ascii_alphabetic()),
        Some(b) => b.is_ascii_alphabetic(),
        None => false,
    }
}

/// Advances past ASCII whitespace.
fn skip_whitespace(input: &str, pos: usize) -> usize {
    input[pos..]
        .find(|c: char| !c.is_ascii_whitespace())
        .map_or(input.len(), |i| pos + i)
}

/// Replaces character references with the characters they name. Unknown references are kept.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        if let Some((c, len)) = decode_entity(rest) {
            out.push(c);
            rest = &rest[len..];
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Decodes one reference at the start of `s`, returning the character and bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let (semi, _) = s
        .char_indices()
        .take(MAX_ENTITY_LEN)
        .find(|&(_, c)| c == ';')?;
    let body = &s[1..semi];
    let c = if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        char::from_u32(code)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{a0}',
            "copy" => '\u{a9}',
            _ => return None,
        }
    };
    Some((c, semi + 1))
}

/// Recursive-descent markup reader.
struct Parser<'a> {
    /// Full input.
    input: &'a str,
    /// Current byte offset.
    pos: usize,
    /// Document being built.
    doc: Document,
    /// Open elements, innermost last.
    open: Vec<(NodeId, String)>,
}

impl Parser<'_> {
    /// Node that new content is appended to.
    fn parent(&self) -> NodeId {
        self.open
            .last()
            .map_or_else(|| self.doc.document_node(), |(id, _)| *id)
    }

    /// Consumes the whole input.
    fn run(&mut self) -> Result<(), TreeError> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            if rest.starts_with("<!--") {
                self.skip_until(4, "-->", "unterminated comment")?;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_until(2, ">", "unterminated declaration")?;
            } else if is_tag_start(rest) && rest.starts_with("</") {
                self.close_tag()?;
            } else if is_tag_start(rest) {
                self.open_tag()?;
            } else {
                self.text()?;
            }
        }
        Ok(())
    }

    /// Skips past the next `terminator` found at least `skip` bytes ahead.
    fn skip_until(&mut self, skip: usize, terminator: &str, message: &str) -> Result<(), TreeError> {
        let from = self.pos + skip;
        let end = self.input[from..]
            .find(terminator)
            .ok_or_else(|| TreeError::markup(self.pos, message))?;
        self.pos = from + end + terminator.len();
        Ok(())
    }

    /// Reads a text run up to the next tag.
    fn text(&mut self) -> Result<(), TreeError> {
        let rest = &self.input[self.pos..];
        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(i, c)| c == '<' && is_tag_start(&rest[i..]))
            .map_or(rest.len(), |(i, _)| i);
        let text = decode_entities(&rest[..end]);
        self.pos += end;
        if !text.is_empty() {
            let parent = self.parent();
            self.doc.append_text(parent, &text)?;
        }
        Ok(())
    }

    /// Reads a closing tag and pops the matching open element.
    fn close_tag(&mut self) -> Result<(), TreeError> {
        let start = self.pos;
        let input = self.input;
        let rest = &input[start + 2..];
        let end = rest
            .find('>')
            .ok_or_else(|| TreeError::markup(start, "unterminated closing tag"))?;
        let name = rest[..end].trim().to_ascii_lowercase();
        self.pos = start + 2 + end + 1;

        if VOID_ELEMENTS.contains(&name.as_str()) {
            return Ok(());
        }
        match self.open.iter().rposition(|(_, open)| *open == name) {
            Some(index) => {
                self.open.truncate(index);
                Ok(())
            }
            None => Err(TreeError::markup(
                start,
                format!("unexpected closing tag </{name}>"),
            )),
        }
    }

    /// Reads an opening tag, its attributes, and raw-text content where applicable.
    fn open_tag(&mut self) -> Result<(), TreeError> {
        let start = self.pos;
        let input = self.input;
        let name_start = start + 1;
        let name_end = input[name_start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_')))
            .map_or(input.len(), |i| name_start + i);
        let mut element = Element::new(&input[name_start..name_end]);

        let mut pos = name_end;
        let mut self_closing = false;
        loop {
            pos = skip_whitespace(input, pos);
            let rest = &input[pos..];
            if rest.is_empty() {
                return Err(TreeError::markup(
                    start,
                    format!("unterminated tag <{}", element.name),
                ));
            }
            if rest.starts_with("/>") {
                self_closing = true;
                pos += 2;
                break;
            }
            if rest.starts_with('>') {
                pos += 1;
                break;
            }
            if rest.starts_with('/') {
                pos += 1;
                continue;
            }
            let (name, value, next) = parse_attribute(input, pos, start)?;
            pos = next;
            if name == "class" {
                for class in value.split_ascii_whitespace() {
                    element.add_class(class);
                }
            } else {
                element.attributes.push((name, value));
            }
        }
        self.pos = pos;

        let name = element.name.clone();
        if let Some((_, top)) = self.open.last()
            && *top == name
            && SELF_CLOSING_SIBLINGS.contains(&name.as_str())
        {
            self.open.pop();
        }

        let parent = self.parent();
        let id = self.doc.append_parsed_element(parent, element)?;
        if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            return Ok(());
        }
        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            return self.raw_text(id, &name, start);
        }
        self.open.push((id, name));
        Ok(())
    }

    /// Reads raw content up to `</name` and consumes the closing tag.
    fn raw_text(&mut self, id: NodeId, name: &str, start: usize) -> Result<(), TreeError> {
        let input = self.input;
        let rest = &input[self.pos..];
        let needle = format!("</{name}");
        let end = rest
            .to_ascii_lowercase()
            .find(&needle)
            .ok_or_else(|| TreeError::markup(start, format!("unterminated <{name}> element")))?;
        if end > 0 {
            self.doc.append_text(id, &rest[..end])?;
        }
        let after = self.pos + end;
        let close = input[after..]
            .find('>')
            .ok_or_else(|| TreeError::markup(after, "unterminated closing tag"))?;
        self.pos = after + close + 1;
        Ok(())
    }
}

/// Reads `name`, `name=value`, or `name="value"` at `pos`. Returns the lowercase name, the
/// decoded value, and the offset after the attribute.
fn parse_attribute(
    input: &str,
    pos: usize,
    tag_start: usize,
) -> Result<(String, String, usize), TreeError> {
    let rest = &input[pos..];
    let name_len = rest
        .find(|c: char| c.is_ascii_whitespace() || matches!(c, '=' | '>' | '/'))
        .unwrap_or(rest.len());
    // A stray '=' or quote still has to make progress
    let name_len = if name_len == 0 {
        rest.chars().next().map_or(0, char::len_utf8)
    } else {
        name_len
    };
    let name = rest[..name_len].to_ascii_lowercase();

    let after_name = skip_whitespace(input, pos + name_len);
    if !input[after_name..].starts_with('=') {
        return Ok((name, String::new(), pos + name_len));
    }

    let value_start = skip_whitespace(input, after_name + 1);
    let rest = &input[value_start..];
    match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let close = rest[1..].find(quote).ok_or_else(|| {
                TreeError::markup(tag_start, format!("unterminated value for attribute '{name}'"))
            })?;
            let value = decode_entities(&rest[1..=close]);
            Ok((name, value, value_start + close + 2))
        }
        _ => {
            let len = rest
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(rest.len());
            Ok((name, decode_entities(&rest[..len]), value_start + len))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn parses_body_as_root() {
        let doc = parse_markup(
            "<!DOCTYPE html><html><head><title>T</title></head>\
             <body><p>Hello world</p></body></html>",
        )
        .unwrap();
        let body = doc.body().unwrap();
        assert_eq!(doc.root(), body);
        assert_eq!(doc.text_content(body), "Hello world");
    }

    #[test]
    fn fragment_without_body_uses_document_node() {
        let doc = parse_markup("<p>one</p><p>two</p>").unwrap();
        assert_eq!(doc.root(), doc.document_node());
        assert_eq!(doc.text_content(doc.root()), "onetwo");
    }

    #[test]
    fn head_and_script_are_excluded() {
        let doc = parse_markup(
            "<head><title>secret</title></head><body><script>var x = 1 < 2;</script></body>",
        )
        .unwrap();
        let top = doc.children(doc.document_node());
        assert_eq!(doc.kind(top[0]), NodeKind::Excluded);
        let script = doc.children(doc.body().unwrap())[0];
        assert_eq!(doc.kind(script), NodeKind::Excluded);
        assert_eq!(doc.text_content(script), "var x = 1 < 2;");
    }

    #[test]
    fn decodes_entities() {
        let doc = parse_markup("<p>a &amp; b &lt;c&gt; &#65;&#x42; &copy; &bogus; &</p>").unwrap();
        assert_eq!(
            doc.text_content(doc.root()),
            "a & b <c> AB \u{a9} &bogus; &"
        );
    }

    #[test]
    fn skips_comments() {
        let doc = parse_markup("<p>a<!-- <b>hidden</b> -->b</p>").unwrap();
        assert_eq!(doc.text_content(doc.root()), "ab");
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        let doc = parse_markup("<p>1 < 2 and 3 <= 4</p>").unwrap();
        assert_eq!(doc.text_content(doc.root()), "1 < 2 and 3 <= 4");
    }

    #[test]
    fn reads_classes_and_attributes() {
        let doc = parse_markup(r#"<div class="a  b" id=main data-x='1 &amp; 2'>x</div>"#).unwrap();
        let div = doc.children(doc.root())[0];
        let el = doc.element(div).unwrap();
        assert_eq!(el.classes, vec!["a", "b"]);
        assert_eq!(el.attribute("id"), Some("main"));
        assert_eq!(el.attribute("data-x"), Some("1 & 2"));
    }

    #[test]
    fn void_and_self_closing_elements_take_no_children() {
        let doc = parse_markup("<p>a<br>b<img src=x.png/>c</p>").unwrap();
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.children(p).len(), 5);
        assert_eq!(doc.text_content(p), "abc");
    }

    #[test]
    fn paragraphs_close_implicitly() {
        let doc = parse_markup("<div><p>one<p>two</div>").unwrap();
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.children(div).len(), 2);
    }

    #[test]
    fn closing_tags_are_case_insensitive() {
        let doc = parse_markup("<DIV><Em>x</EM></div>").unwrap();
        assert_eq!(doc.to_markup(), "<div><em>x</em></div>");
    }

    #[test]
    fn stray_closing_tag_is_an_error() {
        let err = parse_markup("<p>a</span></p>").unwrap_err();
        assert!(matches!(err, TreeError::Markup { position: 4, .. }));
    }

    #[test]
    fn unterminated_constructs_are_errors() {
        assert!(parse_markup("<p class=\"x").is_err());
        assert!(parse_markup("<p>a<!-- never closed").is_err());
        assert!(parse_markup("<script>alert(1)").is_err());
        assert!(parse_markup("<div").is_err());
    }

    #[test]
    fn unclosed_elements_end_at_input_end() {
        let doc = parse_markup("<div><p>open").unwrap();
        assert_eq!(doc.text_content(doc.root()), "open");
    }

    #[test]
    fn writes_markup_back() {
        let source = r#"<body><p class="intro">Tom &amp; Jerry</p><hr><script>a < b</script></body>"#;
        let doc = parse_markup(source).unwrap();
        assert_eq!(doc.to_markup(), source);
    }

    #[test]
    fn written_markup_includes_markers() {
        let mut doc = parse_markup("<p>hello</p>").unwrap();
        let p = doc.children(doc.root())[0];
        let text = doc.children(p)[0];
        let marker = doc.create_marker("hello", "highlight");
        doc.replace(text, marker).unwrap();
        assert_eq!(
            doc.to_markup(),
            r#"<p><span class="highlight">hello</span></p>"#
        );
    }
}
