use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_lookup(
    config: Config,
    case_type: &str,
    case_number: &str,
    filing_year: &str,
) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    let record = shared
        .case_service
        .search(case_type, case_number, filing_year)
        .await?;

    let d = &record.details;
    println!("Case {}", record.query);
    println!("{:-<60}", "");
    println!("Parties:       {}", d.parties_names);
    println!("Court:         {}", d.court_name);
    println!("Judge:         {}", d.judge_name);
    println!("Status:        {}", d.case_status);
    println!("Filed:         {}", d.filing_date);
    println!("Next hearing:  {}", d.next_hearing_date);
    println!("Last order:    {}", d.last_order_date);
    println!("Order link:    {}", d.latest_order_link);

    Ok(())
}
