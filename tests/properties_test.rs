use content_aggregator::sources::properties::{PageProperties, RemotePage};
use serde_json::json;

fn page(properties: serde_json::Value) -> RemotePage {
    serde_json::from_value(json!({
        "id": "6a1e6f54-4a8f-4a0e-9c8e-0a3c1d2b4f60",
        "properties": properties,
    }))
    .unwrap()
}

fn full_page() -> RemotePage {
    page(json!({
        "Name": { "type": "title", "title": [
            { "plain_text": "A " }, { "plain_text": "Remote Post" },
        ]},
        "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "a-remote-post" }] },
        "Description": { "type": "rich_text", "rich_text": [{ "plain_text": "About things" }] },
        "Status": { "type": "select", "select": { "name": "Published" } },
        "Tags": { "type": "multi_select", "multi_select": [
            { "name": "rust" }, { "name": "blog" },
        ]},
        "Publication Date": { "type": "date", "date": { "start": "2024-03-01" } },
        "Scheduled Date": { "type": "date", "date": null },
        "Shelved": { "type": "checkbox", "checkbox": false },
    }))
}

#[test]
fn extracts_typed_properties_from_the_bag() {
    let props = PageProperties::extract(&full_page()).unwrap();

    assert_eq!(props.title, "A Remote Post");
    assert_eq!(props.slug, "a-remote-post");
    assert_eq!(props.description, "About things");
    assert_eq!(props.status, "Published");
    assert_eq!(props.tags, ["rust", "blog"]);
    assert_eq!(props.publication_date.as_deref(), Some("2024-03-01"));
    assert_eq!(props.scheduled_date, None);
    assert!(!props.shelved);
}

#[test]
fn page_without_title_is_rejected() {
    let page = page(json!({
        "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "orphan" }] },
    }));
    assert!(PageProperties::extract(&page).is_none());
}

#[test]
fn page_without_slug_is_rejected() {
    let page = page(json!({
        "Name": { "type": "title", "title": [{ "plain_text": "No Slug" }] },
    }));
    assert!(PageProperties::extract(&page).is_none());
}

#[test]
fn mismatched_property_kinds_fall_back_to_defaults() {
    // Tags delivered as rich text and Shelved as a select read as empty and
    // false rather than failing the page.
    let page = page(json!({
        "Name": { "type": "title", "title": [{ "plain_text": "Odd Types" }] },
        "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "odd-types" }] },
        "Tags": { "type": "rich_text", "rich_text": [{ "plain_text": "rust" }] },
        "Shelved": { "type": "select", "select": { "name": "yes" } },
    }));

    let props = PageProperties::extract(&page).unwrap();
    assert!(props.tags.is_empty());
    assert!(!props.shelved);
    assert_eq!(props.status, "");
    assert_eq!(props.publication_date, None);
}

#[test]
fn unknown_property_kinds_deserialize_and_read_as_empty() {
    let page = page(json!({
        "Name": { "type": "title", "title": [{ "plain_text": "Has Extras" }] },
        "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "has-extras" }] },
        "Word Count": { "type": "number", "number": 1234 },
    }));

    let props = PageProperties::extract(&page).unwrap();
    assert_eq!(props.title, "Has Extras");
}

#[test]
fn empty_select_reads_as_no_status() {
    let page = page(json!({
        "Name": { "type": "title", "title": [{ "plain_text": "Draftish" }] },
        "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "draftish" }] },
        "Status": { "type": "select", "select": null },
    }));

    let props = PageProperties::extract(&page).unwrap();
    assert_eq!(props.status, "");
}
