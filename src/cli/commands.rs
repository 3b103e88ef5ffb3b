use crate::app::{AppContext, Result};
use crate::feed::format_time;
use crate::store::Store;

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        println!("Nothing to search for");
        return Ok(());
    }

    let results = ctx.aggregator.search(query).await;
    if results.is_empty() {
        println!("No results found");
        return Ok(());
    }

    println!(
        "{} results from {}:",
        results.len(),
        ctx.aggregator.source_names().join(", ")
    );
    println!();
    for result in &results {
        println!("[{}] {}", result.provider, result.title);
        if let Some(snippet) = &result.snippet {
            println!("    {}", snippet);
        }
        if let Some(link) = &result.link {
            println!("    {}", link);
        }
    }

    Ok(())
}

pub async fn list_feed(ctx: &AppContext) -> Result<()> {
    let count = ctx.load_feed().await?;
    if count == 0 {
        println!("No videos");
        return Ok(());
    }

    println!("{} videos:", count);
    println!();
    for video in ctx.store.videos()? {
        let duration = video
            .duration_ms
            .map(format_time)
            .unwrap_or_else(|| "-:--".to_string());
        println!(
            "{:>5}  {:<40}  {}x{}",
            duration,
            video.display_title(),
            video.width,
            video.height
        );
        println!("       {}", video.url);
    }

    Ok(())
}
