use scraper::Html;
use tracing::{debug, info, warn};

pub mod index_oglasi;
pub mod report;

mod config;
mod error;

pub use config::{Config, DEFAULT_BASE_URL};
pub use error::ScrapeError;

use index_oglasi::Listing;

/// Extraction seam: turns one parsed results page into its listing records.
pub trait PageScraper {
    type Record;

    fn scrape(&self, doc: &Html) -> Vec<Self::Record>;
}

/// Outcome of one page, kept so failed pages can be reported at the end of
/// the run instead of aborting it.
pub struct PageOutcome<R> {
    pub page: u32,
    pub url: String,
    pub result: Result<Vec<R>, ScrapeError>,
}

pub async fn fetch_page(url: &str) -> Result<String, ScrapeError> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(ScrapeError::Status(status));
    }
    Ok(response.text().await?)
}

async fn scrape_page<S: PageScraper>(
    scraper: &S,
    url: &str,
) -> Result<Vec<S::Record>, ScrapeError> {
    let html = fetch_page(url).await?;
    let doc = Html::parse_document(&html);
    Ok(scraper.scrape(&doc))
}

/// Splits page outcomes into the flattened dataset (page order, then in-page
/// order) and the pages that failed outright.
fn aggregate<R>(outcomes: Vec<PageOutcome<R>>) -> (Vec<R>, Vec<(u32, String)>) {
    let mut records = Vec::new();
    let mut failed = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(page_records) => records.extend(page_records),
            Err(_) => failed.push((outcome.page, outcome.url)),
        }
    }
    (records, failed)
}

pub async fn run<S>(config: &Config, scraper: &S) -> Result<(), ScrapeError>
where
    S: PageScraper<Record = Listing>,
{
    let mut outcomes = Vec::with_capacity(config.page_count as usize);
    for page in 1..=config.page_count {
        let url = config.page_url(page);
        info!("Scraping page {} - URL: {}", page, url);
        let result = scrape_page(scraper, &url).await;
        if let Err(e) = &result {
            warn!("Page {} yielded no records: {}", page, e);
        }
        outcomes.push(PageOutcome { page, url, result });
    }

    let (listings, failed) = aggregate(outcomes);

    if !failed.is_empty() {
        warn!("{} page(s) failed:", failed.len());
        for (page, url) in &failed {
            warn!("  page {} - {}", page, url);
        }
    }

    if listings.is_empty() {
        info!("No data found.");
        return Ok(());
    }

    info!("Scraped {} listings", listings.len());
    for listing in &listings {
        debug!("\n{}", listing);
    }

    let html = report::render(&listings)?;
    report::write(&config.output_path, &html)?;
    info!("Report written to {}", config.output_path.display());

    if let Err(e) = open::that(&config.output_path) {
        warn!("Could not open the report in a browser: {}", e);
    }

    Ok(())
}
