use clap::Parser;
use std::path::PathBuf;

/// index.hr search for osobni automobili with the filters baked into the
/// query string; the 1-based page number is appended at the end.
pub const DEFAULT_BASE_URL: &str = "https://www.index.hr/oglasi/osobni-automobili/gid/27?pojamZup=-2&markavozila=11944&modelvozila=11969&tipoglasa=1&sortby=2&elementsNum=100&grad=0&naselje=0&cijenaod=0&cijenado=40450&vezani_na=179-1190_470-910_1172-1335_359-1192&num=";

#[derive(Debug, Parser)]
#[command(about = "Scrape index.hr vehicle listings into a static HTML report")]
pub struct Config {
    /// Search URL prefix; the page number is appended verbatim.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of result pages to fetch.
    #[arg(long, default_value_t = 7)]
    pub page_count: u32,

    /// Path the rendered report is written to.
    #[arg(long, default_value = "report.html")]
    pub output_path: PathBuf,
}

impl Config {
    pub fn page_url(&self, page: u32) -> String {
        format!("{}{}", self.base_url, page)
    }
}
