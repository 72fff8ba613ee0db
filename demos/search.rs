//! End-to-end E-utilities session against the live NCBI service.
//!
//! ```text
//! ENTREZ_EMAIL=you@example.org RUST_LOG=entrez_client=debug cargo run --example search
//! ```
//!
//! Five requests are sent back to back; with the anonymous limit the fourth
//! and fifth are held back until the first ones leave the one-second window.

use entrez_client::{EntrezClient, EntrezError, Params, SearchTerms};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), EntrezError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("entrez_client=debug")),
        )
        .init();

    let client = EntrezClient::from_env()?;
    println!("Rate limiter: {:?}\n", client.rate_limiter());

    let start = Instant::now();

    let info = client.info("snp", &Params::new())?;
    println!("[{:>6?}] einfo     {}", start.elapsed(), info.status());

    let terms = SearchTerms::new()
        .field("WORD", "hapmap")
        .field("SEQS", "inprogress");
    let found = client.search("genomeprj", terms, &Params::new().with("retmode", "xml"))?;
    println!("[{:>6?}] esearch   {}", start.elapsed(), found.status());

    let either = client.search_with_operator(
        "gene",
        SearchTerms::new().field("sym", "BRCA1").field("WORD", "tumor suppressor"),
        "OR",
        &Params::new().with("retmax", 5),
    )?;
    println!("[{:>6?}] esearch   {}", start.elapsed(), either.status());

    let record = client.fetch(
        "snp",
        &Params::new().with("id", vec![123, 456]).with("retmode", "xml"),
    )?;
    println!("[{:>6?}] efetch    {}", start.elapsed(), record.status());

    let summary = client.summary("snp", &Params::new().with("id", 123))?;
    println!("[{:>6?}] esummary  {}", start.elapsed(), summary.status());

    println!("\n{}", client.rate_limiter().metrics().summary());

    let preview: String = summary.text().chars().take(400).collect();
    println!("\nesummary body (truncated):\n{preview}");

    Ok(())
}
