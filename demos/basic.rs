//! Basic example demonstrating the OTX API client.
//!
//! Run with:
//! ```
//! X_OTX_API_KEY=your-key cargo run --example basic
//! ```

use otxapi::{
    get_pulse, get_subscribed_pulses_page, get_user_details, search_all_pulses_stream,
    search_pulses, ListOptions, OtxClient,
};

#[tokio::main]
async fn main() -> otxapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating OTX client...");
    let client = OtxClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Who owns this key?
    println!("\n--- User ---");
    let user = get_user_details(&client).await?;
    println!(
        "{} (id {:?}), {} pulses",
        user.username.as_deref().unwrap_or("unknown"),
        user.user_id,
        user.pulse_count.unwrap_or(0)
    );

    // First page of the subscription feed
    println!("\n--- Subscribed Pulses (first page) ---");
    let feed = get_subscribed_pulses_page(&client, Some(&ListOptions::for_page(1, 10))).await?;
    println!(
        "Showing {} pulses (total: {:?}, more: {})",
        feed.len(),
        feed.total_count,
        feed.has_next()
    );

    for pulse in &feed {
        println!(
            "  - {} ({})",
            pulse.name.as_deref().unwrap_or("-"),
            pulse.id.as_deref().unwrap_or("-")
        );
    }

    // Full details for the first pulse
    if let Some(id) = feed.items.first().and_then(|p| p.id.as_deref()) {
        println!("\n--- Pulse Details ---");
        let pulse = get_pulse(&client, id).await?;
        println!("Pulse: {}", pulse.name.as_deref().unwrap_or("-"));
        println!("  Author: {}", pulse.author.as_deref().unwrap_or("unknown"));
        println!("  TLP: {}", pulse.tlp.as_deref().unwrap_or("unknown"));
        println!("  Indicators: {}", pulse.indicators.len());

        for indicator in pulse.indicators.iter().take(5) {
            println!(
                "    {} = {}",
                indicator.indicator_type.as_deref().unwrap_or("?"),
                indicator.indicator.as_deref().unwrap_or("?")
            );
        }
    }

    // Search, one page then everything
    println!("\n--- Search: emotet ---");
    let opts = ListOptions::search("emotet");
    let response = search_pulses(&client, &opts).await?;
    println!(
        "Number of results: {}",
        response.page.total_count.unwrap_or(0)
    );

    let mut stream = search_all_pulses_stream(&client, &opts, 10);
    let mut shown = 0;
    while let Some(hit) = stream.recv().await {
        let hit = hit?;
        if shown < 10 {
            println!("  - {}", hit.name.as_deref().unwrap_or("-"));
        }
        shown += 1;
    }
    println!("Streamed {} results", shown);

    println!("\nDone!");
    Ok(())
}
