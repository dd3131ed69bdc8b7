//! HTTP client example for stockroom
//!
//! Demonstrates how to page through the stockroom catalog API.
//!
//! Usage:
//!   cargo run -p api-client [--url http://localhost:8080]

use stockroom_core::{ErrorBody, PageResponse, ProductResponse};

const DEFAULT_URL: &str = "http://localhost:8080";

async fn fetch(
    client: &reqwest::Client,
    url: String,
) -> Result<PageResponse<ProductResponse>, Box<dyn std::error::Error>> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body: ErrorBody = response.json().await?;
        let mut message = format!("{}: {}", status, body.error);
        for v in &body.violations {
            message.push_str(&format!("\n     {}: {}", v.field, v.message));
        }
        return Err(message.into());
    }
    Ok(response.json().await?)
}

fn print_page(page: &PageResponse<ProductResponse>) {
    let info = &page.page_info;
    println!(
        "   {} product(s) total, page {} of {} (size {})\n",
        info.total_elements,
        info.page + 1,
        info.total_pages.max(1),
        info.size
    );
    for p in &page.content {
        println!("   - #{} {} [{}] {} ({} in stock)", p.id, p.name, p.category, p.price, p.stock);
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::args()
        .nth(1)
        .filter(|arg| !arg.starts_with('-'))
        .or_else(|| {
            std::env::args()
                .skip_while(|arg| arg != "--url")
                .nth(1)
        })
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    println!("Stockroom API Client Demo");
    println!("=========================\n");
    println!("Connecting to: {}\n", base_url);

    let client = reqwest::Client::new();

    // 1. Walk every page of the catalog
    println!("1. Listing all products, 5 per page...\n");
    let mut page_no = 0;
    loop {
        let page = fetch(
            &client,
            format!("{}/products?page={}&size=5&sortBy=id&sortDirection=ASC", base_url, page_no),
        )
        .await?;
        print_page(&page);
        if !page.page_info.has_next {
            break;
        }
        page_no += 1;
    }

    // 2. Keyword search
    println!("2. Searching for \"phone\"...\n");
    let page = fetch(&client, format!("{}/products/search?keyword=phone", base_url)).await?;
    print_page(&page);

    // 3. Category and keyword together
    println!("3. Filtering electronics matching \"pro\"...\n");
    let page = fetch(
        &client,
        format!("{}/products/filter?category=electronics&keyword=pro", base_url),
    )
    .await?;
    print_page(&page);

    // 4. Price range, cheapest first
    println!("4. Products between 10000 and 50000...\n");
    let page = fetch(
        &client,
        format!(
            "{}/products/price-range?minPrice=10000&maxPrice=50000&sortBy=price&sortDirection=ASC",
            base_url
        ),
    )
    .await?;
    print_page(&page);

    // 5. A rejected request
    println!("5. Asking for an oversized page...\n");
    match fetch(&client, format!("{}/products?size=500", base_url)).await {
        Ok(_) => println!("   Unexpectedly accepted"),
        Err(e) => println!("   Rejected: {}", e),
    }

    println!("\nDemo complete!");

    Ok(())
}
