use test_utils::listings_answer_fixture;

use super::LinkRenderer;
use super::Segment;

fn text(value: &str) -> Segment {
    return Segment::Text(value.to_string());
}

fn link(url: &str, label: &str) -> Segment {
    return Segment::Link {
        url: url.to_string(),
        label: label.to_string(),
    };
}

#[test]
fn it_renders_plain_text() {
    let res = LinkRenderer::render("Hello there");
    assert_eq!(res, vec![vec![text("Hello there")]]);
}

#[test]
fn it_renders_nothing_for_empty_text() {
    assert!(LinkRenderer::render("").is_empty());
}

#[test]
fn it_replaces_links_and_keeps_trailing_punctuation_as_text() {
    let res = LinkRenderer::render("Check https://x.test/tour, now");
    assert_eq!(
        res,
        vec![vec![
            text("Check "),
            link("https://x.test/tour", "View Link"),
            text(", now"),
        ]]
    );
}

#[test]
fn it_labels_virtual_tours() {
    assert_eq!(
        LinkRenderer::label("https://x.test/palm/virtual-tour"),
        "View Virtual Tour"
    );
    assert_eq!(
        LinkRenderer::label("https://x.test/Virtual_Tour/1"),
        "View Virtual Tour"
    );
    assert_eq!(
        LinkRenderer::label("https://x.test/virtual%20tour"),
        "View Virtual Tour"
    );
    assert_eq!(LinkRenderer::label("https://x.test/tour"), "View Link");
    assert_eq!(LinkRenderer::label("https://x.test/virtualtour"), "View Link");
}

#[test]
fn it_replaces_every_occurrence_of_a_repeated_url() {
    let res = LinkRenderer::render("https://a.test and again https://a.test");
    assert_eq!(
        res,
        vec![vec![
            link("https://a.test", "View Link"),
            text(" and again "),
            link("https://a.test", "View Link"),
        ]]
    );
}

#[test]
fn it_substitutes_in_extraction_order() {
    // The shorter URL is extracted first, so it is also substituted inside the
    // longer one.
    let res = LinkRenderer::render("https://a.test/x then https://a.test/x/y");
    assert_eq!(
        res,
        vec![vec![
            link("https://a.test/x", "View Link"),
            text(" then "),
            link("https://a.test/x", "View Link"),
            text("/y"),
        ]]
    );
}

#[test]
fn it_splits_paragraphs() {
    let res = LinkRenderer::render(listings_answer_fixture());
    let brochure = "https://creekheights.test/brochure";

    assert_eq!(res.len(), 6);
    assert_eq!(
        res[0],
        vec![text("Here are 2 listings that match what you asked for.")]
    );
    assert!(res[1].is_empty());
    assert_eq!(
        res[2],
        vec![
            text("1. Palm Residences, Dubai Marina. Take the tour at "),
            link(
                "https://tours.infinitiview.test/palm-residences/virtual-tour",
                "View Virtual Tour"
            ),
            text("."),
        ]
    );
    assert_eq!(
        res[3],
        vec![
            text("2. Creek Heights, Dubai Creek Harbour (details: "),
            link(brochure, "View Link"),
            text(")"),
        ]
    );
    assert!(res[4].is_empty());
    assert_eq!(
        res[5],
        vec![
            text("Both developers are happy to arrange a visit, see "),
            link(brochure, "View Link"),
            text(" for opening hours!"),
        ]
    );
}

#[test]
fn it_handles_crlf_line_breaks() {
    let res = LinkRenderer::render("first\r\nsecond");
    assert_eq!(res, vec![vec![text("first")], vec![text("second")]]);
}

#[test]
fn it_is_idempotent() {
    let first = LinkRenderer::render(listings_answer_fixture());
    let second = LinkRenderer::render(listings_answer_fixture());
    assert_eq!(first, second);
}

#[test]
fn it_renders_html() {
    let res = LinkRenderer::render("Tour <here>: https://x.test/virtual-tour\nBye & thanks");

    insta::assert_snapshot!(LinkRenderer::to_html(&res), @r###"
    <p>Tour &lt;here&gt;: <a href="https://x.test/virtual-tour" target="_blank" rel="noopener noreferrer">View Virtual Tour</a></p>
    <p>Bye &amp; thanks</p>
    "###);
}

#[test]
fn it_skips_blank_paragraphs_in_html() {
    let res = LinkRenderer::render("First\n\n\nSecond https://x.test\n");

    insta::assert_snapshot!(LinkRenderer::to_html(&res), @r###"
    <p>First</p>
    <p>Second <a href="https://x.test" target="_blank" rel="noopener noreferrer">View Link</a></p>
    "###);
}

#[test]
fn it_renders_lines() {
    let res = LinkRenderer::render("See https://x.test/a.\n\nThanks");

    assert_eq!(
        LinkRenderer::to_lines(&res),
        vec![
            "See View Link (https://x.test/a).".to_string(),
            "".to_string(),
            "Thanks".to_string(),
        ]
    );
}
