//! Faceted search over a small product catalog, from the command line.
//!
//! Each invocation is one "request": pass the same `key=value` parameters a
//! query string would carry and the full search response is printed as JSON,
//! including facet counts and the URL parameters for every navigation link.
//!
//! ```text
//! catalog category=shoes
//! catalog category=shoes brand=acme sort=pricey page=2
//! catalog q=boots price=30-100
//! ```

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;

use facette::{FilterManager, FilterOptions, FilterRegistry, Relation};
use facette_memory::filters::{
    ChoiceFilter, PagerFilter, QueryStringFilter, RangeFilter, SortFilter,
};
use facette_memory::{Dir, MemoryEngine};

/// Search a demo product catalog with faceted filters.
///
/// Known parameters: category, brand, q, price (as `from-to`), sort
/// (`cheap` or `pricey`), page.
#[derive(Parser)]
#[command(name = "catalog")]
#[command(version)]
struct Cli {
    /// Request parameters as `key=value` pairs.
    params: Vec<String>,

    /// Skip facet counts and print the bare hits.
    #[arg(long)]
    simple: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let request = parse_params(&cli.params)?;
    let manager = FilterManager::new(registry()?, demo_catalog());

    if cli.simple {
        let results = manager.simple_search(&request)?;
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let response = manager.execute(&request)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn parse_params(params: &[String]) -> Result<HashMap<String, String>> {
    let mut request = HashMap::new();
    for param in params {
        let Some((key, value)) = param.split_once('=') else {
            bail!("parameter '{param}' is not of the form key=value");
        };
        request.insert(key.to_string(), value.to_string());
    }
    Ok(request)
}

fn registry() -> Result<FilterRegistry<MemoryEngine>> {
    // Navigating any facet restarts pagination.
    let facet = || FilterOptions::new().reset_relation(Relation::exclude(["page"]));

    FilterRegistry::builder()
        .filter(
            "category",
            ChoiceFilter::new("category", "category").options(facet().tag("sidebar")),
        )
        .filter(
            "brand",
            ChoiceFilter::new("brand", "brand").options(facet().tag("sidebar")),
        )
        .filter("price", RangeFilter::new("price", "price").options(facet()))
        .filter("q", QueryStringFilter::new("q", "title").options(facet()))
        .filter(
            "sort",
            SortFilter::new("sort")
                .choice("cheap", "price", Dir::Asc)
                .choice("pricey", "price", Dir::Desc)
                .default_key("cheap")
                .options(facet()),
        )
        .filter("page", PagerFilter::new("page", 4))
        .build()
        .context("invalid filter configuration")
}

fn demo_catalog() -> MemoryEngine {
    MemoryEngine::new(vec![
        json!({"title": "Trail Boots", "category": "shoes", "brand": "acme", "price": 80}),
        json!({"title": "City Sneakers", "category": "shoes", "brand": "zenith", "price": 40}),
        json!({"title": "Leather Boots", "category": "shoes", "brand": "acme", "price": 120}),
        json!({"title": "Canvas Slip-ons", "category": "shoes", "brand": "loom", "price": 30}),
        json!({"title": "Wool Shirt", "category": "shirts", "brand": "acme", "price": 25}),
        json!({"title": "Linen Shirt", "category": "shirts", "brand": "loom", "price": 35}),
        json!({"title": "Flannel Shirt", "category": "shirts", "brand": "zenith", "price": 45}),
        json!({"title": "Rain Jacket", "category": "jackets", "brand": "zenith", "price": 95}),
        json!({"title": "Down Jacket", "category": "jackets", "brand": "acme", "price": 160}),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_parse_and_reject_malformed_input() {
        let request = parse_params(&["category=shoes".to_string(), "page=2".to_string()]).unwrap();
        assert_eq!(request.get("category").map(String::as_str), Some("shoes"));
        assert_eq!(request.get("page").map(String::as_str), Some("2"));

        assert!(parse_params(&["nonsense".to_string()]).is_err());
    }

    #[test]
    fn demo_registry_is_valid() {
        assert!(registry().is_ok());
    }

    #[test]
    fn demo_search_runs_end_to_end() {
        let manager = FilterManager::new(registry().unwrap(), demo_catalog());
        let request = parse_params(&["category=shoes".to_string()]).unwrap();

        let response = manager.execute(&request).unwrap();
        assert_eq!(response.results.total, 4);
        assert!(!response.results.buckets("brand").is_empty());
    }
}
