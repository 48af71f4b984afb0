use ambit_cart::Product;
use anyhow::Context;
use serde::Deserialize;

const CATALOG: &str = r#"{
    "products": [
        { "id": 1, "name": "Laptop",   "price_cents": 99999, "description": "High-performance laptop" },
        { "id": 2, "name": "Mouse",    "price_cents": 2999,  "description": "Wireless mouse" },
        { "id": 3, "name": "Keyboard", "price_cents": 7999,  "description": "Mechanical keyboard" },
        { "id": 4, "name": "Monitor",  "price_cents": 29999, "description": "27-inch 4K monitor" }
    ]
}"#;

#[derive(Deserialize)]
struct Catalog {
    products: Vec<Product>,
}

pub fn sample_products() -> anyhow::Result<Vec<Product>> {
    let catalog: Catalog = serde_json::from_str(CATALOG).context("parsing sample catalog")?;
    Ok(catalog.products)
}
