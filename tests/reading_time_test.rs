use content_aggregator::reading_time::estimate;

#[test]
fn empty_input_is_one_minute() {
    assert_eq!(estimate(Some("")), 1);
}

#[test]
fn missing_input_is_one_minute() {
    assert_eq!(estimate(None), 1);
}

#[test]
fn very_short_content_is_one_minute() {
    assert_eq!(estimate(Some("Hello world")), 1);
}

#[test]
fn two_hundred_words_fit_in_one_minute() {
    let words = vec!["word"; 200].join(" ");
    assert_eq!(estimate(Some(&words)), 1);
}

#[test]
fn rounds_up_past_the_boundary() {
    // 201 words at 200 WPM rounds up to 2 minutes.
    let words = vec!["word"; 201].join(" ");
    assert_eq!(estimate(Some(&words)), 2);
}

#[test]
fn four_hundred_words_take_two_minutes() {
    let words = vec!["word"; 400].join(" ");
    assert_eq!(estimate(Some(&words)), 2);
}

#[test]
fn fenced_code_blocks_do_not_count() {
    let content = format!(
        "{}\n```javascript\n{}\n```",
        vec!["word"; 200].join(" "),
        vec!["code"; 1000].join(" ")
    );
    assert_eq!(estimate(Some(&content)), 1);
}

#[test]
fn inline_code_does_not_count() {
    // "Here is some in a sentence" leaves 6 words.
    assert_eq!(estimate(Some("Here is some `inline code` in a sentence")), 1);
}

#[test]
fn images_do_not_count() {
    assert_eq!(
        estimate(Some("![alt text](https://example.com/image.png) Some words here")),
        1
    );
}

#[test]
fn link_text_counts_but_urls_do_not() {
    // "Click this link to continue" leaves 5 words.
    assert_eq!(
        estimate(Some("Click [this link](https://example.com) to continue")),
        1
    );
}

#[test]
fn html_tags_are_stripped() {
    assert_eq!(estimate(Some("<div>Hello</div> <span>world</span>")), 1);
}

#[test]
fn heading_markers_are_stripped() {
    assert_eq!(estimate(Some("# Heading\n## Subheading\n### Third")), 1);
}

#[test]
fn emphasis_markers_are_stripped_but_text_kept() {
    assert_eq!(
        estimate(Some("**bold** and *italic* and ~~strikethrough~~")),
        1
    );
}

#[test]
fn horizontal_rules_are_stripped() {
    assert_eq!(estimate(Some("Above\n---\nBelow")), 1);
}

#[test]
fn realistic_post_with_code_and_images() {
    // 600 words of prose plus a heading and a link line; the code block and
    // the image contribute nothing. 608 words round up to 4 minutes.
    let prose = vec!["word"; 600].join(" ");
    let content = [
        "# My Blog Post",
        "",
        prose.as_str(),
        "",
        "```typescript",
        "const foo = \"this should not count\"",
        "const bar = \"neither should this\"",
        "```",
        "",
        "![screenshot](./img.png)",
        "",
        "Read [the docs](https://example.com) for more.",
    ]
    .join("\n");
    assert_eq!(estimate(Some(&content)), 4);
}

#[test]
fn content_with_only_code_blocks_is_one_minute() {
    assert_eq!(estimate(Some("```\nconst x = 1\n```")), 1);
}

#[test]
fn content_with_only_images_is_one_minute() {
    assert_eq!(estimate(Some("![img1](url1)\n![img2](url2)\n![img3](url3)")), 1);
}
