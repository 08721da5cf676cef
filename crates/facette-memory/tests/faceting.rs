//! End-to-end faceted search over a small product catalog.

use std::collections::HashMap;

use serde_json::json;

use facette::{FacetteError, FilterManager, FilterOptions, FilterRegistry, Relation};
use facette_memory::filters::{
    ChoiceFilter, PagerFilter, QueryStringFilter, RangeFilter, SortFilter,
};
use facette_memory::{Dir, MemoryEngine, MemoryError};

fn catalog() -> MemoryEngine {
    MemoryEngine::new(vec![
        json!({"title": "Trail Boots", "category": "shoes", "brand": "acme", "price": 80}),
        json!({"title": "City Sneakers", "category": "shoes", "brand": "zenith", "price": 40}),
        json!({"title": "Leather Boots", "category": "shoes", "brand": "acme", "price": 120}),
        json!({"title": "Wool Shirt", "category": "shirts", "brand": "acme", "price": 25}),
        json!({"title": "Linen Shirt", "category": "shirts", "brand": "loom", "price": 35}),
        json!({"title": "Rain Jacket", "category": "jackets", "brand": "zenith", "price": 95}),
    ])
}

fn manager() -> FilterManager<MemoryEngine> {
    // Changing any facet drops the page number.
    let facet = || FilterOptions::new().reset_relation(Relation::exclude(["page"]));

    let registry = FilterRegistry::builder()
        .filter(
            "category",
            ChoiceFilter::new("category", "category").options(facet().tag("sidebar")),
        )
        .filter("brand", ChoiceFilter::new("brand", "brand").options(facet()))
        .filter("price", RangeFilter::new("price", "price").options(facet()))
        .filter("q", QueryStringFilter::new("q", "title").options(facet()))
        .filter(
            "sort",
            SortFilter::new("sort")
                .choice("cheap", "price", Dir::Asc)
                .choice("pricey", "price", Dir::Desc)
                .default_key("cheap"),
        )
        .filter("page", PagerFilter::new("page", 2))
        .build()
        .expect("registry configuration is valid");

    FilterManager::new(registry, catalog())
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn unfiltered_search_pages_and_counts_everything() {
    let response = manager().execute(&params(&[])).unwrap();

    // The pager's page size applies even on page 1.
    assert_eq!(response.results.total, 6);
    assert_eq!(response.results.hits.len(), 2);

    // Default sort: cheapest first.
    assert_eq!(response.results.hits[0]["title"], "Wool Shirt");
    assert_eq!(response.results.hits[1]["title"], "Linen Shirt");

    let category = response.results.buckets("category");
    assert_eq!(category.len(), 3);
    assert_eq!(category[0].key, "shoes");
    assert_eq!(category[0].count, 3);
}

#[test]
fn selected_facet_still_counts_its_alternatives() {
    let response = manager()
        .execute(&params(&[("category", "shoes")]))
        .unwrap();

    assert_eq!(response.results.total, 3);

    // The category facet ignores its own selection: all three categories
    // keep their full-corpus counts.
    let category = response.results.buckets("category");
    assert_eq!(category.len(), 3);
    assert_eq!(category.iter().find(|b| b.key == "shirts").unwrap().count, 2);

    // The brand facet, by contrast, is narrowed by the category selection.
    let brand = response.results.buckets("brand");
    assert_eq!(brand.iter().find(|b| b.key == "acme").unwrap().count, 2);
    assert_eq!(brand.iter().find(|b| b.key == "zenith").unwrap().count, 1);
    assert!(brand.iter().all(|b| b.key != "loom"));
}

#[test]
fn two_selected_facets_narrow_each_other_but_not_themselves() {
    let response = manager()
        .execute(&params(&[("category", "shoes"), ("brand", "acme")]))
        .unwrap();

    assert_eq!(response.results.total, 2);

    // Category counts are computed under brand=acme only.
    let category = response.results.buckets("category");
    assert_eq!(category.iter().find(|b| b.key == "shoes").unwrap().count, 2);
    assert_eq!(category.iter().find(|b| b.key == "shirts").unwrap().count, 1);

    // Brand counts are computed under category=shoes only.
    let brand = response.results.buckets("brand");
    assert_eq!(brand.iter().find(|b| b.key == "acme").unwrap().count, 2);
    assert_eq!(brand.iter().find(|b| b.key == "zenith").unwrap().count, 1);
}

#[test]
fn range_and_text_filters_narrow_the_hits() {
    let response = manager()
        .execute(&params(&[("price", "30-100"), ("q", "boots")]))
        .unwrap();

    assert_eq!(response.results.total, 1);
    assert_eq!(response.results.hits[0]["title"], "Trail Boots");
}

#[test]
fn sort_and_pager_shape_the_hit_window() {
    let response = manager()
        .execute(&params(&[("sort", "pricey"), ("page", "2")]))
        .unwrap();

    assert_eq!(response.results.total, 6);
    // Page 2 of 2-per-page, priciest first: positions 3 and 4.
    assert_eq!(response.results.hits[0]["title"], "Trail Boots");
    assert_eq!(response.results.hits[1]["title"], "City Sneakers");
}

#[test]
fn apply_links_drop_the_page_number() {
    let response = manager()
        .execute(&params(&[("category", "shoes"), ("page", "2")]))
        .unwrap();

    let category = response.view("category").unwrap();
    // reset_relation = Exclude({page}): navigating this facet restarts
    // pagination but keeps its own and every other filter's state.
    assert_eq!(
        category.url_parameters.get("category").map(String::as_str),
        Some("shoes")
    );
    assert!(!category.url_parameters.contains_key("page"));

    // The reset link additionally drops the facet's own state.
    assert!(!category.reset_url_parameters.contains_key("category"));
    assert!(!category.reset_url_parameters.contains_key("page"));
}

#[test]
fn pager_links_preserve_the_other_filters() {
    let response = manager()
        .execute(&params(&[("category", "shoes"), ("page", "2")]))
        .unwrap();

    let pager = response.view("page").unwrap();
    assert_eq!(
        pager.url_parameters.get("category").map(String::as_str),
        Some("shoes")
    );
    assert_eq!(pager.url_parameters.get("page").map(String::as_str), Some("2"));

    assert_eq!(pager.payload["page"], 2);
    assert_eq!(pager.payload["page_size"], 2);
    assert_eq!(pager.payload["total_pages"], 2);
}

#[test]
fn response_url_parameters_reproduce_the_request() {
    let response = manager()
        .execute(&params(&[("category", "shoes"), ("sort", "pricey")]))
        .unwrap();

    assert_eq!(
        response.url_parameters.get("category").map(String::as_str),
        Some("shoes")
    );
    assert_eq!(
        response.url_parameters.get("sort").map(String::as_str),
        Some("pricey")
    );
    assert_eq!(response.url_parameters.len(), 2);

    // Executing the reproduced parameters again yields the same search.
    let again = manager()
        .execute(&response.url_parameters.clone())
        .unwrap();
    assert_eq!(again.results.total, response.results.total);
    assert_eq!(again.url_parameters, response.url_parameters);
}

#[test]
fn view_data_is_emitted_for_every_filter_in_order() {
    let response = manager().execute(&params(&[])).unwrap();

    let names: Vec<&str> = response.view_data.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["category", "brand", "price", "q", "sort", "page"]);
    assert_eq!(response.view("category").unwrap().tags, vec!["sidebar"]);
}

#[test]
fn choice_options_mark_the_active_value() {
    let response = manager()
        .execute(&params(&[("category", "shoes")]))
        .unwrap();

    let options = response.view("category").unwrap().payload["options"]
        .as_array()
        .unwrap()
        .clone();
    let shoes = options
        .iter()
        .find(|o| o["value"] == "shoes")
        .unwrap();
    assert_eq!(shoes["active"], true);
    assert!(options
        .iter()
        .filter(|o| o["value"] != "shoes")
        .all(|o| o["active"] == false));
}

#[test]
fn simple_search_skips_facet_computation() {
    let results = manager()
        .simple_search(&params(&[("category", "shoes")]))
        .unwrap();

    assert_eq!(results.total, 3);
    assert!(results.aggregations.is_empty());
}

#[test]
fn malformed_document_surfaces_as_an_engine_error() {
    let engine = MemoryEngine::new(vec![json!({"ok": true}), json!("not an object")]);
    let registry = FilterRegistry::builder()
        .filter("q", QueryStringFilter::new("q", "title"))
        .build()
        .unwrap();
    let manager = FilterManager::new(registry, engine);

    let err = manager.execute(&params(&[])).unwrap_err();
    match err {
        FacetteError::Engine(source) => {
            let memory = source.downcast_ref::<MemoryError>().unwrap();
            assert!(matches!(memory, MemoryError::InvalidDocument(1)));
        }
        other => panic!("unexpected error: {other}"),
    }
}
