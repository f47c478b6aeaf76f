use crate::config::Config;
use crate::constants::limits::MAX_LIST_LIMIT;
use crate::db::Store;

pub async fn cmd_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    if limit == 0 || limit > MAX_LIST_LIMIT {
        anyhow::bail!("Limit must be between 1 and {MAX_LIST_LIMIT}");
    }

    let store = Store::new(&config.general.database_path).await?;
    let queries = store.recent_queries(limit).await?;

    if queries.is_empty() {
        println!("No queries yet.");
        return Ok(());
    }

    println!("Recent Queries (last {}):", queries.len());
    println!("{:-<60}", "");

    for q in queries {
        println!(
            "#{:<5} {:<24} {}  {}",
            q.id,
            format!("{}/{}/{}", q.case_type, q.case_number, q.filing_year),
            q.query_timestamp,
            q.status
        );
    }

    Ok(())
}
