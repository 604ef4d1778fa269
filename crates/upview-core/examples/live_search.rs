use std::sync::Arc;

use upview_core::{MemoryStore, MovieDb, MovieManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args().nth(1).unwrap_or_else(|| "Matrix".to_string());
    let source = Arc::new(MovieDb::from_env()?);
    let manager = MovieManager::init(source, Arc::new(MemoryStore::new())).await;

    println!("🔍 Searching '{}'...\n", query);

    let mut snapshot = manager.submit_query(&query).await;
    if let Some(error) = &snapshot.error {
        println!("❌ {}", error);
        return Ok(());
    }

    // load_more leaves the page unchanged on failure, so stop when it stalls
    while snapshot.has_more && snapshot.current_page < 3 {
        let previous_page = snapshot.current_page;
        snapshot = manager.load_more().await;
        if snapshot.current_page == previous_page {
            println!("⚠️  Could not load page {}", previous_page + 1);
            break;
        }
    }

    println!(
        "Showing {} of {} results:",
        snapshot.results.len(),
        snapshot.total_results
    );
    for (i, item) in snapshot.results.iter().enumerate() {
        println!(
            "  {}. {} ({}) [{}] - {}",
            i + 1,
            item.title,
            item.year,
            item.media_type.as_str(),
            item.imdb_id
        );
    }

    if let Some(first) = snapshot.results.first() {
        println!("\n🎬 Loading detail: {} ({})\n", first.title, first.imdb_id);

        let detail = manager.movie_detail(&first.imdb_id).await?;
        let na = |v: &Option<String>| v.clone().unwrap_or_else(|| "—".to_string());

        println!("Title:    {}", detail.title);
        println!("Year:     {}", detail.year);
        println!("Runtime:  {}", na(&detail.runtime));
        println!("Genre:    {}", detail.genres().join(", "));
        println!("Director: {}", na(&detail.director));
        println!("Actors:   {}", detail.actor_list().join(", "));
        println!(
            "Rating:   {}",
            detail
                .rating()
                .map(|r| format!("{:.1}/10", r))
                .unwrap_or_else(|| "—".to_string())
        );
        println!("\n{}", na(&detail.plot));
    }

    Ok(())
}
