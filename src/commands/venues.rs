use anyhow::Result;
use artwalk_core::data::DataLoader;
use artwalk_core::links::map_search_url;
use owo_colors::OwoColorize;

pub async fn run(mut loader: DataLoader) -> Result<()> {
    let venues = loader.fetch_venues().await;

    if venues.is_empty() {
        println!("{}", "No venues found".dimmed());
        return Ok(());
    }

    for (name, address) in &venues {
        println!("{}", name.bold());
        println!("    {}", address);
        println!("    {}", map_search_url(address)?.to_string().dimmed());
    }

    Ok(())
}
