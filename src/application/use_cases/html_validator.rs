// ============================================================
// HTML VALIDATOR USE CASE
// ============================================================
// Fail-fast structural check of a constrained HTML subset

use crate::domain::error::{AppError, Result};
use crate::domain::html::{
    entities, excerpt, HtmlNode, HtmlViolation, RootKind, ValidationPolicy, ViolationRule,
    CONTAINER_ELEMENTS, DEFAULT_ALLOWED_TAGS,
};
use crate::infrastructure::html::{build_tree, scan, source_scanner, Segment};

type Check = std::result::Result<(), HtmlViolation>;

const EXCERPT_CHARS: usize = 50;

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Raw-text elements whose content never holds character references.
const SCRIPT_ELEMENTS: &[&str] = &["script", "style"];

const PARAGRAPH_MESSAGE: &str = "Empty or nested <p> tags are not allowed";

/// Validate `html` against the default allow-list or a caller-supplied one.
pub fn validate_html(
    html: &str,
    allowed_tags: Option<&[&str]>,
    is_text_at_root_level_allowed: bool,
) -> Result<()> {
    let policy = ValidationPolicy::new()
        .with_allowed_tags(allowed_tags.unwrap_or(DEFAULT_ALLOWED_TAGS).iter())
        .with_root_text(is_text_at_root_level_allowed);
    HtmlValidator::new(policy).validate(html)
}

/// Reusable validator bound to one policy.
#[derive(Debug, Clone, Default)]
pub struct HtmlValidator {
    policy: ValidationPolicy,
}

impl HtmlValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate a document, surfacing the first violation as `AppError::ParseError`.
    pub fn validate(&self, html: &str) -> Result<()> {
        self.check(html).map_err(AppError::from)
    }

    /// Validate a document and return the first violation as a typed value.
    ///
    /// Tags, root-level text and character references are checked in one pass
    /// over the source as written, so the first violation in document order
    /// wins. A parser would decode references and add or drop elements, which
    /// is why the parsed tree is only used by the structure rules. Those run
    /// last, when the policy enables them.
    pub fn check(&self, html: &str) -> Check {
        if html.trim().is_empty() {
            return Ok(());
        }

        let segments = scan(html);
        self.walk_segments(html, &segments)?;

        if self.policy.structure_checks {
            let document = build_tree(html);
            for node in document.top_level() {
                check_structure(node, None, false)?;
            }
            check_markup(&segments)?;
        }

        Ok(())
    }

    fn walk_segments(&self, source: &str, segments: &[Segment<'_>]) -> Check {
        let root_depth = match root_kind(segments) {
            RootKind::Wrapper => 1,
            RootKind::Implicit => 0,
        };
        let mut open: Vec<&str> = Vec::new();

        for segment in segments {
            match segment {
                Segment::StartTag { name, self_closing } => {
                    self.check_tag(name)?;
                    if !*self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                        open.push(name);
                    }
                }
                Segment::EndTag { name } => close_element(&mut open, name),
                Segment::Text { offset, raw } => {
                    if open.len() <= root_depth {
                        self.check_root_text(raw)?;
                    }
                    let in_script = open.last().is_some_and(|tag| SCRIPT_ELEMENTS.contains(tag));
                    if !in_script {
                        check_references(source, *offset, raw)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_root_text(&self, raw: &str) -> Check {
        let text = raw.trim();
        if self.policy.allow_root_text || text.is_empty() {
            return Ok(());
        }
        Err(HtmlViolation::new(
            ViolationRule::RootText,
            format!(
                "Text must be wrapped in a block element, found: {}",
                excerpt(text, EXCERPT_CHARS)
            ),
        ))
    }

    fn check_tag(&self, name: &str) -> Check {
        if self.policy.is_allowed(name) {
            return Ok(());
        }
        Err(HtmlViolation::new(
            ViolationRule::DisallowedTag,
            format!(
                "Tag '{}' is not allowed. Only {} are allowed.",
                name,
                self.policy.describe_allowed()
            ),
        ))
    }
}

/// Pop `name` and anything left open inside it. Unmatched end tags are ignored.
fn close_element(open: &mut Vec<&str>, name: &str) {
    if let Some(pos) = open.iter().rposition(|tag| *tag == name) {
        open.truncate(pos);
    }
}

/// `Wrapper` when the source is a single container element, blank text around it ignored.
fn root_kind(segments: &[Segment<'_>]) -> RootKind {
    let mut open: Vec<&str> = Vec::new();
    let mut top_level: Vec<&Segment<'_>> = Vec::new();

    for segment in segments {
        match segment {
            Segment::StartTag { name, self_closing } => {
                if open.is_empty() {
                    top_level.push(segment);
                }
                if !*self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                    open.push(name);
                }
            }
            Segment::EndTag { name } => close_element(&mut open, name),
            Segment::Text { raw, .. } => {
                if open.is_empty() && !raw.trim().is_empty() {
                    top_level.push(segment);
                }
            }
        }
    }

    match top_level.as_slice() {
        [Segment::StartTag {
            name,
            self_closing: false,
        }] if CONTAINER_ELEMENTS.contains(&name.as_str()) => RootKind::Wrapper,
        _ => RootKind::Implicit,
    }
}

/// Every `&` in a text run must open a known, `;`-terminated reference.
fn check_references(source: &str, offset: usize, raw: &str) -> Check {
    for (idx, _) in raw.match_indices('&') {
        let start = offset + idx;
        let after = &source[start + 1..];
        let body_len = after
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'#')
            .count();

        if after.as_bytes().get(body_len) != Some(&b';') {
            return Err(HtmlViolation::new(
                ViolationRule::UnescapedAmpersand,
                format!(
                    "Text contains unescaped &: {}",
                    excerpt(&source[start..], EXCERPT_CHARS)
                ),
            ));
        }

        let body = &after[..body_len];
        if entities::resolve(body).is_none() {
            return Err(HtmlViolation::new(
                ViolationRule::InvalidEntity,
                format!(
                    "Invalid HTML entity: &{}; in: {}",
                    body,
                    excerpt(&source[start..], EXCERPT_CHARS)
                ),
            ));
        }
    }
    Ok(())
}

/// List and paragraph rules over the parsed tree.
fn check_structure(node: &HtmlNode, parent: Option<&str>, inside_paragraph: bool) -> Check {
    let HtmlNode::Element { name, children } = node else {
        return Ok(());
    };

    match name.as_str() {
        "ul" | "ol" => {
            if let Some(child) = children.iter().filter_map(HtmlNode::name).find(|c| *c != "li") {
                return Err(HtmlViolation::new(
                    ViolationRule::ListStructure,
                    format!("<{}> can only contain <li> elements, found <{}>", name, child),
                ));
            }
        }
        "li" if !matches!(parent, Some("ul") | Some("ol")) => {
            let location = match parent {
                Some(parent) => format!("found inside <{}>", parent),
                None => "found at the document root".to_string(),
            };
            return Err(HtmlViolation::new(
                ViolationRule::ListItemParent,
                format!("<li> must be a direct child of <ul> or <ol>, {}", location),
            ));
        }
        "p" if inside_paragraph => {
            return Err(HtmlViolation::new(
                ViolationRule::NestedParagraph,
                PARAGRAPH_MESSAGE,
            ));
        }
        "p" if node.text_content().trim().is_empty() => {
            return Err(HtmlViolation::new(
                ViolationRule::EmptyParagraph,
                PARAGRAPH_MESSAGE,
            ));
        }
        _ => {}
    }

    let inside_paragraph = inside_paragraph || name == "p";
    for child in children {
        check_structure(child, Some(name.as_str()), inside_paragraph)?;
    }
    Ok(())
}

/// Rules that need the markup as written: stray `<`, nested `<p>` and unclosed tags.
fn check_markup(segments: &[Segment<'_>]) -> Check {
    let mut open: Vec<&str> = Vec::new();

    for segment in segments {
        match segment {
            Segment::Text { raw, .. } => {
                let in_raw_text = open
                    .last()
                    .map_or(false, |tag| source_scanner::is_raw_text_element(tag));
                if !in_raw_text && raw.contains('<') {
                    return Err(HtmlViolation::new(
                        ViolationRule::UnescapedLessThan,
                        "Unescaped '<' found in text content. Use '&lt;' instead.",
                    ));
                }
            }
            Segment::StartTag { name, self_closing } => {
                if *self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                    continue;
                }
                if name == "p" && open.contains(&"p") {
                    return Err(HtmlViolation::new(
                        ViolationRule::NestedParagraph,
                        PARAGRAPH_MESSAGE,
                    ));
                }
                open.push(name);
            }
            Segment::EndTag { name } => {
                if let Some(pos) = open.iter().rposition(|tag| *tag == name.as_str()) {
                    if pos + 1 < open.len() {
                        return Err(unclosed(&open[pos + 1..]));
                    }
                    open.pop();
                }
            }
        }
    }

    if open.is_empty() {
        Ok(())
    } else {
        Err(unclosed(&open))
    }
}

fn unclosed(tags: &[&str]) -> HtmlViolation {
    HtmlViolation::new(
        ViolationRule::UnclosedTag,
        format!("Unclosed tags found: {}", tags.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<()>) -> String {
        match result {
            Err(AppError::ParseError(msg)) => msg,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    fn strict() -> HtmlValidator {
        HtmlValidator::new(ValidationPolicy::strict())
    }

    #[test]
    fn test_nested_allowed_tags_pass() {
        let result = validate_html("<div><span>hi</span></div>", Some(&["div", "span"][..]), false);
        assert!(result.is_ok());
    }

    #[test]
    fn test_text_directly_in_wrapper_is_root_text() {
        let msg = message(validate_html("<div>hi</div>", Some(&["div", "span"][..]), false));
        assert!(msg.starts_with("Text must be wrapped in a block element"));
        assert!(msg.contains("hi"));
    }

    #[test]
    fn test_disallowed_tag_is_named() {
        let msg = message(validate_html("<div><b>hi</b></div>", Some(&["div"][..]), false));
        assert!(msg.contains("'b'"), "{}", msg);
    }

    #[test]
    fn test_root_text_flag() {
        let html = "Text not in paragraph";
        let msg = message(validate_html(html, None, false));
        assert!(msg.starts_with("Text must be wrapped in a block element, found: Text not"));
        assert!(validate_html(html, None, true).is_ok());

        let mixed = "<p>Paragraph</p>And some text";
        assert!(validate_html(mixed, None, false).is_err());
        assert!(validate_html(mixed, None, true).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_html("", None, false).is_ok());
        assert!(validate_html("  \n", None, false).is_ok());
    }

    #[test]
    fn test_default_allow_list() {
        let ok = [
            "<p>This is <b>bold</b>, <i>italic</i>, <u>underlined</u>, <em>emphasized</em>, <strong>strong</strong> text.</p>",
            "<p>Subscript: H<sub>2</sub>O, Superscript: x<sup>2</sup></p>",
            "<p>Visit <a href='https://example.com?a=1&b=2'>example</a> for more info</p>",
            "<ul><li>First item</li><li>Second item</li></ul>",
            "<p>Text before</p><ol><li>Item</li></ol><p>Text after</p>",
        ];
        for html in ok {
            assert!(validate_html(html, None, false).is_ok(), "{}", html);
        }

        let msg = message(validate_html("<p><span>Span</span></p>", None, false));
        assert!(msg.starts_with("Tag 'span' is not allowed. Only <a>, <b>, <em>"));
        let msg = message(validate_html("<p>Line 1<br>Line 2</p>", None, false));
        assert!(msg.starts_with("Tag 'br' is not allowed"));
    }

    #[test]
    fn test_first_violation_in_document_order() {
        let msg = message(validate_html("<p><span>a</span><div>b</div></p>", None, false));
        assert!(msg.starts_with("Tag 'span'"));
    }

    #[test]
    fn test_known_entities_pass() {
        let ok = [
            "<p>5 &lt; 10</p>",
            "<p>AT&amp;T</p>",
            "<p>Quotes: &quot;double&quot; and &apos;single&apos;</p>",
            "<p>Numeric: &#34;double&#34; and &#x27;single&#x27;</p>",
            "<p>Mixed: 1 &lt; 2 &amp;&amp; 3 &gt; 2</p>",
            "<p>Caf&#233; &mdash; &nbsp;</p>",
            "<p>&#65;</p>",
        ];
        for html in ok {
            assert!(validate_html(html, None, false).is_ok(), "{}", html);
        }
    }

    #[test]
    fn test_unknown_entity_is_reported() {
        let msg = message(validate_html("<p>Invalid entity: &unknownEntity;</p>", None, false));
        assert!(msg.contains("&unknownEntity;"), "{}", msg);
        assert!(msg.starts_with("Invalid HTML entity: &unknownEntity; in: &unknownEntity;</p>"));
    }

    #[test]
    fn test_unescaped_ampersand() {
        let msg = message(validate_html("<p>AT&T</p>", None, false));
        assert_eq!(msg, "Text contains unescaped &: &T</p>...");

        let msg = message(validate_html("<p>Missing semicolon: &amp</p>", None, false));
        assert!(msg.starts_with("Text contains unescaped &: &amp</p>"));

        let msg = message(validate_html("<p>Ends with ampersand &", None, false));
        assert!(msg.starts_with("Text contains unescaped &: &"));
    }

    #[test]
    fn test_invalid_numeric_references() {
        assert!(validate_html("<p>&#0;</p>", None, false).is_err());
        assert!(validate_html("<p>&#xZZ;</p>", None, false).is_err());
        assert!(validate_html("<p>&#;</p>", None, false).is_err());
    }

    #[test]
    fn test_ampersand_in_attribute_is_ignored() {
        assert!(validate_html("<p><a href='/?x=1&y=2'>x</a></p>", None, false).is_ok());
    }

    #[test]
    fn test_validation_is_repeatable() {
        let validator = HtmlValidator::new(ValidationPolicy::new().with_allowed_tags(["div"]));
        let first = validator.validate("<div><b>hi</b></div>");
        let second = validator.validate("<div><b>hi</b></div>");
        assert_eq!(first, second);
        assert!(first.is_err());
    }

    #[test]
    fn test_input_is_not_modified() {
        let html = String::from("<p>AT&amp;T</p>");
        let before = html.clone();
        let _ = validate_html(&html, None, false);
        assert_eq!(html, before);
    }

    #[test]
    fn test_violation_rule_is_exposed() {
        let validator = HtmlValidator::default();
        let violation = validator.check("<p>&bogus;</p>").unwrap_err();
        assert_eq!(violation.rule, ViolationRule::InvalidEntity);
        let violation = validator.check("<div>x</div>").unwrap_err();
        assert_eq!(violation.rule, ViolationRule::DisallowedTag);
    }

    #[test]
    fn test_full_document_tags_are_checked() {
        let html = "<html><head><title>Title</title></head><body><p>Content</p></body></html>";
        let tags = ["html", "head", "title", "body", "p"];
        assert!(validate_html(html, Some(&tags[..]), false).is_ok());
        let msg = message(validate_html(html, None, false));
        assert!(msg.starts_with("Tag 'html' is not allowed"));
    }

    #[test]
    fn test_strict_passes_well_formed_content() {
        let ok = [
            "<p>Paragraph with <b>bold</b> text</p>",
            "<ul>\n  <li>Item 1</li>\n  <li>Item 2\n    <ul>\n      <li>Sub</li>\n    </ul>\n  </li>\n</ul>",
            "<p>Text before</p><ul><li>Item</li></ul><p>Text after</p>",
        ];
        for html in ok {
            assert!(strict().validate(html).is_ok(), "{}", html);
        }
    }

    #[test]
    fn test_strict_list_rules() {
        let msg = message(strict().validate("<ul><p>Not an li</p></ul>"));
        assert!(msg.starts_with("<ul> can only contain <li> elements"));

        let msg = message(strict().validate("<li>Not in a list</li>"));
        assert!(msg.starts_with("<li> must be a direct child of <ul> or <ol>"));
    }

    #[test]
    fn test_strict_paragraph_rules() {
        for html in ["<p></p>", "<p>   </p>", "<p>One, then <p>Nested</p></p>"] {
            assert_eq!(message(strict().validate(html)), PARAGRAPH_MESSAGE, "{}", html);
        }
    }

    #[test]
    fn test_strict_unescaped_less_than() {
        for html in ["<p>5 < 10</p>", "<p>if x < 5: print(x)</p>"] {
            let msg = message(strict().validate(html));
            assert_eq!(msg, "Unescaped '<' found in text content. Use '&lt;' instead.");
        }
        assert!(strict().validate("<p>5 &lt; 10</p>").is_ok());
    }

    #[test]
    fn test_strict_unclosed_tags() {
        let msg = message(strict().validate("<p>Unclosed <a href='#'>link</p>"));
        assert_eq!(msg, "Unclosed tags found: a");

        let msg = message(strict().validate("<p>Never closed"));
        assert_eq!(msg, "Unclosed tags found: p");
    }

    #[test]
    fn test_structure_rules_off_by_default() {
        assert!(validate_html("<p></p>", None, false).is_ok());
        assert!(validate_html("<li>Loose</li>", None, false).is_ok());
    }

    #[test]
    fn test_wrapper_tags_written_in_source_are_checked() {
        let msg = message(validate_html("<body><p>x</p></body>", None, false));
        assert!(msg.starts_with("Tag 'body' is not allowed"), "{}", msg);

        let msg = message(validate_html("<head></head><p>x</p>", None, false));
        assert!(msg.starts_with("Tag 'head' is not allowed"), "{}", msg);

        let msg = message(validate_html("<!-- c --><html><p>x</p></html>", None, false));
        assert!(msg.starts_with("Tag 'html' is not allowed"), "{}", msg);
    }

    #[test]
    fn test_parser_implied_elements_are_not_reported() {
        let html = "<html><p>x</p></html>";
        assert!(validate_html(html, Some(&["html", "p"][..]), false).is_ok());

        let table = "<table><tr><td>x</td></tr></table>";
        assert!(validate_html(table, Some(&["table", "tr", "td"][..]), false).is_ok());
    }

    #[test]
    fn test_first_violation_wins_across_rules() {
        let validator = HtmlValidator::default();

        let violation = validator.check("<p>&bogus;</p><div>x</div>").unwrap_err();
        assert_eq!(violation.rule, ViolationRule::InvalidEntity);

        let violation = validator.check("<div>x</div><p>&bogus;</p>").unwrap_err();
        assert_eq!(violation.rule, ViolationRule::DisallowedTag);

        let violation = validator.check("stray &bogus; <p>ok</p>").unwrap_err();
        assert_eq!(violation.rule, ViolationRule::RootText);

        let violation = validator.check("<p>AT&T</p>Loose text").unwrap_err();
        assert_eq!(violation.rule, ViolationRule::UnescapedAmpersand);
    }

    #[test]
    fn test_script_and_style_content_is_not_entity_checked() {
        let tags = ["p", "script", "style", "title"];
        let html = "<p>x</p><script>if (a && b) {}</script><style>a::after { content: \"&\"; }</style>";
        assert!(validate_html(html, Some(&tags[..]), false).is_ok());

        let msg = message(validate_html("<title>A & B</title>", Some(&tags[..]), false));
        assert!(msg.starts_with("Text contains unescaped &"), "{}", msg);
    }

    #[test]
    fn test_root_kind_follows_source() {
        assert_eq!(root_kind(&scan("\n<div>hi</div>\n")), RootKind::Wrapper);
        assert_eq!(root_kind(&scan("<!-- c --><body><p>x</p></body>")), RootKind::Wrapper);
        assert_eq!(root_kind(&scan("<p>hi</p>")), RootKind::Implicit);
        assert_eq!(root_kind(&scan("<div>a</div><div>b</div>")), RootKind::Implicit);
        assert_eq!(root_kind(&scan("<div>a</div> tail")), RootKind::Implicit);
    }
}
