use std::path::PathBuf;

use draft_hub::board::{BoardQuery, SortKey, big_board};
use draft_hub::config::AppConfig;
use draft_hub::dataset::{Dataset, ScoutService, StatCategory};
use draft_hub::profile::number_or_na;
use draft_hub::stat_hub::{StatHub, sort_by_category};

fn parse_sort(raw: &str) -> Option<SortKey> {
    let raw = raw.trim().to_ascii_lowercase();
    if raw == "avg" || raw == "average" {
        return Some(SortKey::AverageRank);
    }
    ScoutService::ALL
        .iter()
        .find(|s| s.label().to_ascii_lowercase() == raw)
        .map(|s| SortKey::Scout(*s))
}

// Usage: board_report [dataset.json] [--sort espn|vecenie|o'connor|boone|parrish|avg] [--search text]
fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut config = AppConfig::from_env();
    let mut query = BoardQuery::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sort" => {
                let raw = args.next().unwrap_or_default();
                match parse_sort(&raw) {
                    Some(key) => query.sort = key,
                    None => anyhow::bail!("unknown sort key: {raw}"),
                }
            }
            "--search" => query.search = args.next().unwrap_or_default(),
            path => config.data_path = Some(PathBuf::from(path)),
        }
    }

    let dataset: Dataset = config.load_dataset()?;
    let hub = StatHub::build(&dataset);

    println!("Big Board (sort: {})", query.sort.label());
    for (idx, row) in big_board(&dataset, &hub.medals, &query).iter().enumerate() {
        let medals = row
            .medals
            .iter()
            .map(|m| m.medal.icon())
            .collect::<Vec<_>>()
            .join("");
        let chips = row
            .chips
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:>3}. {} {} | Avg: {} | {}",
            idx + 1,
            row.player.name,
            medals,
            number_or_na(row.average_rank),
            chips
        );
    }

    println!();
    println!("Stat Hub (sort: {})", StatCategory::Points.label());
    for row in sort_by_category(&hub.rows, StatCategory::Points) {
        let stats = StatCategory::ALL
            .iter()
            .map(|c| {
                let pct = row
                    .percentile(*c)
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                format!("{} {} ({pct})", c.label(), number_or_na(row.value(*c)))
            })
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{} | {stats}", row.name);
    }

    Ok(())
}
