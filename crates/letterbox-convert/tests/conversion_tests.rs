use chrono::NaiveDate;
use letterbox_convert::{convert, ConversionRequest, FOOTER_TRUNCATED_MARKER};

const NEWSLETTER: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>body { font-family: sans-serif; }</style>
</head>
<body>
  <center>
    <table width="600">
      <tr><td><h1>The Weekly Rust</h1></td></tr>
      <tr><td><p>Hello   readers,</p><p>This week: <a href="https://blog.rust-lang.org">Rust 2.0</a> and <b>more</b>.</p></td></tr>
      <tr><td><ul><li>Item one</li><li>Item two</li></ul></td></tr>
      <tr><td><p>You received this email because you subscribed. Unsubscribe</p><p>123 Main St</p></td></tr>
    </table>
  </center>
  <script>track();</script>
</body>
</html>"#;

#[test]
fn test_newsletter_end_to_end() {
    let md = convert(NEWSLETTER, None, None, Some("Unsubscribe"));

    assert!(md.starts_with("# The Weekly Rust\n\n"), "got: {md:?}");
    assert!(md.contains("Hello readers,"));
    assert!(md.contains("This week: [Rust 2.0](https://blog.rust-lang.org) and **more**."));
    assert!(md.contains("* Item one\n* Item two"));
    assert!(md.ends_with(FOOTER_TRUNCATED_MARKER));
    assert!(!md.contains("123 Main St"));
    assert!(!md.contains("You received"));
    assert!(!md.contains("track"));
    assert!(!md.contains("font-family"));
}

#[test]
fn test_newsletter_without_marker_keeps_footer() {
    let md = convert(NEWSLETTER, None, None, None);
    assert!(md.contains("123 Main St"));
    assert!(!md.contains(FOOTER_TRUNCATED_MARKER));
}

#[test]
fn test_header_presence() {
    let delivered = NaiveDate::from_ymd_opt(2026, 2, 28)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let md = convert("<p>Hi</p>", Some("S"), Some(delivered), None);
    assert!(md.starts_with("# S\n\nDate: 2026-02-28 10:00:00\n\n---\n\n"));
    assert!(md.ends_with("Hi"));
}

#[test]
fn test_header_omission() {
    let md = convert("<p>Hi</p>", None, None, None);
    assert!(md.starts_with("Hi"));
    assert!(!md.lines().any(|line| line.starts_with('#')));
    assert!(!md.contains("Date:"));
}

#[test]
fn test_structural_line_breaks() {
    let md = convert("<div>Line1</div><div>Line2</div>", None, None, None);
    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines, vec!["Line1", "Line2"]);
}

#[test]
fn test_break_and_list_items_split_lines() {
    let md = convert("first<br>second<br/>third", None, None, None);
    assert_eq!(md, "first\nsecond\nthird");
}

#[test]
fn test_link_rendering() {
    let md = convert("<a href='https://x.com'>t</a>", None, None, None);
    assert!(md.contains("[t](https://x.com)"));
}

#[test]
fn test_footer_marker_line_removed() {
    let md = convert("<div>A</div><div>B marker</div><div>C</div>", None, None, Some("marker"));
    assert_eq!(md, "A\n\n--- [Footer Truncated] ---");
}

#[test]
fn test_footer_marker_removes_entire_body() {
    let md = convert("<p>marker at top</p><p>more</p>", Some("Subj"), None, Some("marker"));
    assert_eq!(md, "# Subj\n\n---\n\n--- [Footer Truncated] ---");
}

#[test]
fn test_unmatched_or_empty_marker_is_noop() {
    let plain = convert("<p>A</p><p>B</p>", None, None, None);
    assert_eq!(convert("<p>A</p><p>B</p>", None, None, Some("zzz")), plain);
    assert_eq!(convert("<p>A</p><p>B</p>", None, None, Some("")), plain);
}

#[test]
fn test_style_and_script_deeply_nested() {
    let html = "<div><table><tr><td><span><b><style>.hidden{}</style>x\
                <script>document.write('gone')</script></b></span></td></tr></table></div>";
    let md = convert(html, None, None, None);
    assert!(md.contains("**x**"));
    assert!(!md.contains("hidden"));
    assert!(!md.contains("gone"));
}

#[test]
fn test_malformed_markup_degrades() {
    let md = convert("<div><p>open <b>bold <i>both</div></td>&bogus; <<>>", None, None, None);
    assert!(md.contains("open"));
    assert!(md.contains("bold"));
    assert!(md.contains("both"));
}

#[test]
fn test_entities_decoded_by_parser() {
    let md = convert("<p>Fish &amp; Chips &copy; 2026</p>", None, None, None);
    assert_eq!(md, "Fish & Chips © 2026");
}

#[test]
fn test_blank_lines_capped() {
    let md = convert("<p>a</p><p></p><br><br><br><p>b</p>", None, None, None);
    assert!(!md.contains("\n\n\n"));
    assert_eq!(md, "a\n\nb");
}

#[test]
fn test_request_builder() {
    let md = ConversionRequest::new("<h2>Top stories</h2><p>Story</p><p>-- <br>Sent by Digest</p>")
        .with_subject("Digest #42")
        .with_footer_marker("--")
        .convert();
    assert_eq!(
        md,
        "# Digest #42\n\n---\n\n## Top stories\n\nStory\n\n--- [Footer Truncated] ---"
    );
}

#[test]
fn test_blank_text_between_blocks_adds_no_lines() {
    assert_eq!(convert("<p>a</p> <p>b</p>", None, None, None), "a\n\nb");
    assert_eq!(convert("<h1>T</h1> <p>b</p>", None, None, None), "# T\n\nb");
    assert_eq!(convert("<div>x</div> <div>y</div>", None, None, None), "x\ny");
}

#[test]
fn test_deeply_nested_markup_converts() {
    let spans = format!("{}deep text", "<span>".repeat(50_000));
    assert_eq!(convert(&spans, None, None, None), "deep text");

    let divs = format!("{}x", "<div>".repeat(5_000));
    assert_eq!(convert(&divs, Some("Deep"), None, None), "# Deep\n\n---\n\nx");
}

#[test]
fn test_huge_ordered_list_start() {
    let md = convert(
        "<ol start='18446744073709551615'><li>a</li><li>b</li></ol>",
        None,
        None,
        None,
    );
    assert_eq!(md, "18446744073709551615. a\n18446744073709551615. b");
}
