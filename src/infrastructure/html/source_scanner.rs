// ============================================================
// HTML SOURCE SCANNER
// ============================================================
// Splits raw HTML into text runs and tag markers. The tree builder
// decodes character references and repairs markup, so checks that
// need the source as written run over these segments instead.

/// A piece of raw HTML source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Character data as written, `offset` is its byte position in the source
    Text { offset: usize, raw: &'a str },
    StartTag { name: String, self_closing: bool },
    EndTag { name: String },
}

/// Elements whose content is not markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Whether the content of `name` is raw text rather than markup.
pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

/// Split `source` into segments in document order.
///
/// Comments, doctypes and processing instructions are dropped. A `<` that does
/// not open markup stays inside the surrounding text run.
pub fn scan(source: &str) -> Vec<Segment<'_>> {
    let bytes = source.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0usize;
    let mut pos = 0usize;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }

        let Some(markup) = Markup::at(&source[pos..]) else {
            // Stray `<`, keep it in the text run
            pos += 1;
            continue;
        };

        if text_start < pos {
            segments.push(Segment::Text {
                offset: text_start,
                raw: &source[text_start..pos],
            });
        }

        pos = match markup {
            Markup::Comment => find_from(source, pos + 4, "-->").map_or(source.len(), |e| e + 3),
            Markup::Declaration => find_from(source, pos + 2, ">").map_or(source.len(), |e| e + 1),
            Markup::EndTag => {
                let tag = read_tag(source, pos + 2);
                segments.push(Segment::EndTag { name: tag.name });
                tag.end
            }
            Markup::StartTag => {
                let tag = read_tag(source, pos + 1);
                let is_raw_text =
                    is_raw_text_element(&tag.name) && !tag.self_closing;
                let name = tag.name.clone();
                segments.push(Segment::StartTag {
                    name: tag.name,
                    self_closing: tag.self_closing,
                });
                if is_raw_text {
                    skip_raw_text(source, tag.end, &name, &mut segments)
                } else {
                    tag.end
                }
            }
        };
        text_start = pos;
    }

    if text_start < source.len() {
        segments.push(Segment::Text {
            offset: text_start,
            raw: &source[text_start..],
        });
    }

    segments
}

enum Markup {
    Comment,
    Declaration,
    StartTag,
    EndTag,
}

impl Markup {
    /// Kind of markup opened by the `<` at the start of `rest`, if any.
    fn at(rest: &str) -> Option<Self> {
        let letter_at = |idx: usize| {
            rest.as_bytes()
                .get(idx)
                .map_or(false, |b| b.is_ascii_alphabetic())
        };
        if rest.starts_with("<!--") {
            Some(Markup::Comment)
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            Some(Markup::Declaration)
        } else if rest.starts_with("</") && letter_at(2) {
            Some(Markup::EndTag)
        } else if letter_at(1) {
            Some(Markup::StartTag)
        } else {
            None
        }
    }
}

fn find_from(source: &str, from: usize, needle: &str) -> Option<usize> {
    source
        .get(from..)
        .and_then(|tail| tail.find(needle))
        .map(|idx| from + idx)
}

struct RawTag {
    name: String,
    self_closing: bool,
    /// Position after the closing `>`
    end: usize,
}

/// Read a tag name starting at `start` and skip its attributes.
fn read_tag(source: &str, start: usize) -> RawTag {
    let bytes = source.as_bytes();
    let mut pos = start;
    while pos < bytes.len() && !is_name_terminator(bytes[pos]) {
        pos += 1;
    }
    let name = source[start..pos].to_ascii_lowercase();

    let mut quote: Option<u8> = None;
    let mut last_significant: Option<u8> = None;
    while pos < bytes.len() {
        let b = bytes[pos];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => {
                return RawTag {
                    name,
                    self_closing: last_significant == Some(b'/'),
                    end: pos + 1,
                };
            }
            None => {}
        }
        if !b.is_ascii_whitespace() {
            last_significant = Some(b);
        }
        pos += 1;
    }
    RawTag {
        name,
        self_closing: false,
        end: bytes.len(),
    }
}

fn is_name_terminator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

/// Emit the content of a raw-text element as text and return the position of its end tag.
fn skip_raw_text<'a>(
    source: &'a str,
    from: usize,
    name: &str,
    segments: &mut Vec<Segment<'a>>,
) -> usize {
    let closing = format!("</{}", name);
    let lower = source[from..].to_ascii_lowercase();
    let end = lower.find(&closing).map_or(source.len(), |idx| from + idx);
    if from < end {
        segments.push(Segment::Text {
            offset: from,
            raw: &source[from..end],
        });
    }
    end
}
