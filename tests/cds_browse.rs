use dlnacat::catalog::{Catalog, CatalogNode, Resource, ROOT_ID};
use dlnacat::cds::browse::{browse, page_bounds, BrowseError, BrowseFlag, BrowseRequest};
use dlnacat::cds::didl::DidlContext;
use quick_xml::events::Event;
use quick_xml::Reader;

fn ctx() -> DidlContext {
    DidlContext::new("http://192.168.1.5:8200")
}

fn item(id: &str, parent: &str) -> CatalogNode {
    CatalogNode::item(
        id,
        parent,
        format!("Track {id}"),
        "object.item.audioItem.musicTrack",
        Resource::new(format!("/media/{id}"), "audio/mpeg"),
    )
}

/// Root with items "1", "2", "3".
fn three_items() -> Catalog {
    let mut catalog = Catalog::new("Root");
    for id in ["1", "2", "3"] {
        catalog.insert(item(id, ROOT_ID)).unwrap();
    }
    catalog
}

#[test]
fn direct_children_returns_everything_when_count_is_zero() {
    let catalog = three_items();
    let result = browse(&catalog, &ctx(), &BrowseRequest::direct_children(ROOT_ID, 0, 0)).unwrap();
    assert_eq!(result.number_returned, 3);
    assert_eq!(result.total_matches, 3);
    let first = result.didl.find(r#"id="1""#).unwrap();
    let second = result.didl.find(r#"id="2""#).unwrap();
    let third = result.didl.find(r#"id="3""#).unwrap();
    assert!(first < second && second < third, "children out of order:\n{}", result.didl);
}

#[test]
fn page_past_the_middle_is_clipped() {
    let catalog = three_items();
    let result = browse(&catalog, &ctx(), &BrowseRequest::direct_children(ROOT_ID, 2, 5)).unwrap();
    assert_eq!(result.number_returned, 1);
    assert_eq!(result.total_matches, 3);
    assert!(result.didl.contains(r#"id="3""#));
    assert!(!result.didl.contains(r#"id="1""#));
}

#[test]
fn start_beyond_end_returns_empty_page() {
    let catalog = three_items();
    let result = browse(&catalog, &ctx(), &BrowseRequest::direct_children(ROOT_ID, 10, 2)).unwrap();
    assert_eq!(result.number_returned, 0);
    assert_eq!(result.total_matches, 3);
    assert!(!result.didl.contains("<item"));
}

#[test]
fn metadata_returns_the_node_itself() {
    let catalog = three_items();
    let result = browse(&catalog, &ctx(), &BrowseRequest::metadata(ROOT_ID)).unwrap();
    assert_eq!(result.number_returned, 1);
    assert_eq!(result.total_matches, 1);
    assert!(result.didl.contains(r#"<container id="0" parentID="-1""#));
    assert!(result.didl.contains(r#"childCount="3""#));
}

#[test]
fn metadata_ignores_pagination() {
    let catalog = three_items();
    let req = BrowseRequest {
        starting_index: 7,
        requested_count: 1,
        ..BrowseRequest::metadata("2")
    };
    let result = browse(&catalog, &ctx(), &req).unwrap();
    assert_eq!((result.number_returned, result.total_matches), (1, 1));
    assert!(result.didl.contains(r#"<item id="2""#));
}

#[test]
fn unknown_object_is_no_such_object() {
    let catalog = three_items();
    let err = browse(&catalog, &ctx(), &BrowseRequest::direct_children("nope", 0, 0)).unwrap_err();
    assert_eq!(err, BrowseError::NoSuchObject("nope".to_string()));
}

#[test]
fn direct_children_of_item_is_empty() {
    let catalog = three_items();
    let result = browse(&catalog, &ctx(), &BrowseRequest::direct_children("1", 0, 0)).unwrap();
    assert_eq!(result.number_returned, 0);
    assert_eq!(result.total_matches, 0);
}

#[test]
fn update_id_reflects_catalog() {
    let mut catalog = three_items();
    let first = browse(&catalog, &ctx(), &BrowseRequest::metadata(ROOT_ID)).unwrap();
    assert_eq!(first.update_id, catalog.system_update_id());

    catalog.insert(item("4", ROOT_ID)).unwrap();
    let second = browse(&catalog, &ctx(), &BrowseRequest::metadata(ROOT_ID)).unwrap();
    assert!(second.update_id > first.update_id);
}

#[test]
fn browse_flag_parses_exact_names_only() {
    assert_eq!("BrowseMetadata".parse::<BrowseFlag>(), Ok(BrowseFlag::BrowseMetadata));
    assert_eq!(
        "BrowseDirectChildren".parse::<BrowseFlag>(),
        Ok(BrowseFlag::BrowseDirectChildren)
    );
    assert!(matches!(
        "browsemetadata".parse::<BrowseFlag>(),
        Err(BrowseError::InvalidArgs(_))
    ));
    assert!(matches!("".parse::<BrowseFlag>(), Err(BrowseError::InvalidArgs(_))));
}

#[test]
fn page_bounds_never_exceed_total() {
    for total in 0..6usize {
        for start in 0..8u32 {
            for count in 0..8u32 {
                let (lo, hi) = page_bounds(total, start, count);
                assert!(lo <= hi && hi <= total, "total={total} start={start} count={count}");
                let expected = if count == 0 {
                    total.saturating_sub(start as usize)
                } else {
                    (count as usize).min(total.saturating_sub(start as usize))
                };
                assert_eq!(hi - lo, expected, "total={total} start={start} count={count}");
            }
        }
    }
}

/// `id` attributes of the `<item>` elements in a DIDL-Lite document, in order.
fn item_ids(didl: &str) -> Vec<String> {
    let mut reader = Reader::from_str(didl);
    let mut ids = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"item" => {
                let id = e.try_get_attribute("id").unwrap().unwrap();
                ids.push(id.unescape_value().unwrap().into_owned());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    ids
}

#[test]
fn every_page_is_the_matching_slice_of_children() {
    let mut catalog = Catalog::new("Root");
    let children: Vec<String> = (1..=5).map(|i| i.to_string()).collect();
    for id in &children {
        catalog.insert(item(id, ROOT_ID)).unwrap();
    }

    for start in 0..8u32 {
        for count in 0..8u32 {
            let req = BrowseRequest::direct_children(ROOT_ID, start, count);
            let result = browse(&catalog, &ctx(), &req).unwrap();
            let take = if count == 0 { usize::MAX } else { count as usize };
            let expected: Vec<String> = children.iter().skip(start as usize).take(take).cloned().collect();
            assert_eq!(item_ids(&result.didl), expected, "start={start} count={count}");
            assert_eq!(result.number_returned as usize, expected.len(), "start={start} count={count}");
            assert_eq!(result.total_matches, 5, "start={start} count={count}");
        }
    }
}

#[test]
fn page_bounds_handles_max_values() {
    assert_eq!(page_bounds(3, u32::MAX, u32::MAX), (3, 3));
    assert_eq!(page_bounds(3, 1, u32::MAX), (1, 3));
}
