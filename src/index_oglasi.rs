use crate::{PageScraper, ScrapeError};
use lazy_regex::regex;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::warn;

/// One classified ad. Tags keep document order; a later duplicate key within
/// the same list overwrites the earlier value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub title: String,
    pub price_display: String,
    pub price_eur: u64,
    pub price_kn: u64,
    pub tags: Vec<(String, String)>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title     : {}", self.title)?;
        writeln!(f, "Price     : {}", self.price_display)?;
        writeln!(f, "Price EUR : {}", self.price_eur)?;
        writeln!(f, "Price KN  : {}", self.price_kn)?;
        writeln!(f, "Tags      :")?;
        for (key, value) in &self.tags {
            writeln!(f, "> {}: {}", key, value)?;
        }
        Ok(())
    }
}

const E: &str = "Invalid selector";
lazy_static! {
    static ref AD: Selector = Selector::parse("div.OglasiRezHolder").expect(E);
    static ref TITLE: Selector = Selector::parse("span.title.px18").expect(E);
    static ref PRICE: Selector = Selector::parse("span.price").expect(E);
    static ref TAGS: Selector = Selector::parse("ul.tags.hide-on-small-only").expect(E);
    static ref LI: Selector = Selector::parse("li").expect(E);
}

/// Parses the dual-currency price text, format `"<EUR> ~<KN>"`. The site is
/// not consistent about the space before the tilde, so both halves come from
/// one split around `~` and every non-digit character is discarded.
pub fn parse_price(text: &str) -> Result<(u64, u64), ScrapeError> {
    let malformed = || ScrapeError::Price {
        text: text.to_string(),
    };
    let caps = regex!(r"^([^~]*)~(.*)$").captures(text).ok_or_else(malformed)?;
    let eur = parse_digits(&caps[1]).ok_or_else(malformed)?;
    let kn = parse_digits(&caps[2]).ok_or_else(malformed)?;
    Ok((eur, kn))
}

fn parse_digits(half: &str) -> Option<u64> {
    let digits: String = half.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn parse_tags(list: ElementRef) -> Vec<(String, String)> {
    let mut tags: Vec<(String, String)> = Vec::new();
    for li in list.select(&LI) {
        let text = li.text().collect::<String>();
        let text = text.trim();
        // Split on the first colon only; values may contain further colons.
        let (key, value) = match text.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (text, ""),
        };
        match tags.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => tags.push((key.to_string(), value.to_string())),
        }
    }
    tags
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[derive(Debug)]
pub struct IndexOglasiScraper;

impl PageScraper for IndexOglasiScraper {
    type Record = Listing;

    /// Title, price and tag list are all looked up inside one ad container,
    /// so a listing missing one of them cannot shift the fields of the
    /// listings after it.
    fn scrape(&self, doc: &Html) -> Vec<Listing> {
        let mut listings = Vec::new();
        for ad in doc.select(&AD) {
            let Some(title_el) = ad.select(&TITLE).next() else {
                warn!("Skipping ad without a title element");
                continue;
            };
            let Some(price_el) = ad.select(&PRICE).next() else {
                warn!("Skipping ad without a price element");
                continue;
            };

            let title = text_of(title_el);
            let price_display = text_of(price_el);
            let (price_eur, price_kn) = match parse_price(&price_display) {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("Skipping listing {:?}: {}", title, e);
                    continue;
                }
            };
            let tags = ad.select(&TAGS).next().map(parse_tags).unwrap_or_default();

            listings.push(Listing {
                title,
                price_display,
                price_eur,
                price_kn,
                tags,
            });
        }
        listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn scrape_fixture() -> Vec<Listing> {
        let html = fs::read_to_string("tests/htmls/listings.html").expect("Invalid file path");
        let doc = Html::parse_document(&html);
        IndexOglasiScraper.scrape(&doc)
    }

    #[test]
    fn extracts_one_record_per_well_formed_ad() {
        let listings = scrape_fixture();
        // The fixture has four containers; the third has an unparseable price
        // and is skipped.
        assert_eq!(listings.len(), 3);

        assert_eq!(
            listings[0],
            Listing {
                title: "Opel Astra 1.6 CDTI Enjoy".to_string(),
                price_display: "10.600 € ~79.865 kn".to_string(),
                price_eur: 10600,
                price_kn: 79865,
                tags: vec![
                    ("Godište".to_string(), "2015".to_string()),
                    ("Prešao".to_string(), "160.000 km".to_string()),
                    ("Motor".to_string(), "dizel".to_string()),
                ],
            }
        );

        assert_eq!(listings[1].title, "Opel Astra K 1.4 Turbo");
        assert_eq!(listings[1].price_eur, 12900);
        assert_eq!(listings[1].price_kn, 97195);

        // The ad after the malformed one keeps its own fields.
        assert_eq!(listings[2].title, "Opel Astra GTC 1.7 CDTI");
        assert_eq!(listings[2].price_eur, 5500);
        assert_eq!(listings[2].price_kn, 41440);
    }

    #[test]
    fn ad_without_tag_list_gets_empty_tags() {
        let listings = scrape_fixture();
        assert_eq!(listings[2].tags, vec![]);
    }

    #[test]
    fn tag_values_keep_colons_after_the_first_split() {
        let listings = scrape_fixture();
        assert_eq!(
            listings[1].tags,
            vec![
                ("Godište".to_string(), "2018".to_string()),
                // Duplicate "Motor" entry later in the list wins, in place.
                ("Motor".to_string(), "benzin".to_string()),
                ("Napomena".to_string(), "servis: redovit".to_string()),
            ]
        );
    }

    #[test]
    fn price_halves_strip_every_non_digit_character() {
        assert_eq!(parse_price("1.000 ~7.500").unwrap(), (1000, 7500));
        assert_eq!(parse_price("10.600 € ~79.865 kn").unwrap(), (10600, 79865));
    }

    #[test]
    fn price_without_a_space_before_the_tilde_still_parses() {
        assert_eq!(parse_price("1.000~7.500").unwrap(), (1000, 7500));
    }

    #[test]
    fn price_without_both_halves_is_a_parse_error() {
        assert!(matches!(
            parse_price("Na upit"),
            Err(ScrapeError::Price { .. })
        ));
        assert!(matches!(
            parse_price("1.000 ~"),
            Err(ScrapeError::Price { .. })
        ));
    }

    #[test]
    fn tag_item_splits_on_the_first_colon_and_trims() {
        let html = Html::parse_fragment(
            r#"<ul class="tags hide-on-small-only"><li>Godište : 2015</li></ul>"#,
        );
        let list = html.select(&TAGS).next().expect("No tag list in fragment");
        assert_eq!(
            parse_tags(list),
            vec![("Godište".to_string(), "2015".to_string())]
        );
    }
}
