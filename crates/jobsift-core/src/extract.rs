//! Record extraction from rendered results-page markup.
//!
//! The card layout is fixed for the markup this crawler understands, so the
//! selectors live here as statics rather than in [`SiteProfile`]. Every
//! lookup is optional and composed without short-circuiting: a missing
//! sub-element leaves its field at the default and extraction moves on.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::models::{JobRecord, absolutize_href, id_from_href};
use crate::profile::SiteProfile;

struct CardSelectors {
    /// One fragment per job listing on a results page.
    fragment: Selector,
    card: Selector,
    eyebrow: Selector,
    heading: Selector,
    copy: Selector,
    line_break: Selector,
    anchor: Selector,
    date: Selector,
}

static SELECTORS: LazyLock<CardSelectors> = LazyLock::new(|| CardSelectors {
    fragment: sel(".bx--card-group__cards__col"),
    card: sel(".bx--card"),
    eyebrow: sel(".bx--card__eyebrow"),
    heading: sel("h4.bx--card__heading"),
    copy: sel(".ibm--card__copy__inner"),
    line_break: sel("br"),
    anchor: sel("a.bx--card__wrapper"),
    date: sel(".ibm-card__date"),
});

/// Selectors are literals; a parse failure is a programming error caught by
/// the tests below, never a runtime condition.
fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("card selector is valid CSS")
}

/// Find every listing fragment in a rendered page and extract a record from
/// each — including title-less ones, which the pagination driver filters.
/// The fragment count is what distinguishes an empty results page from a
/// page full of malformed cards.
pub fn extract_listings(html: &str, profile: &SiteProfile) -> Vec<JobRecord> {
    let document = Html::parse_document(html);
    document
        .select(&SELECTORS.fragment)
        .map(|fragment| extract_job(fragment, profile))
        .collect()
}

/// Map one listing fragment to a [`JobRecord`]. Never fails: a fragment
/// without a card container yields the all-default record, and each field
/// degrades independently.
pub fn extract_job(fragment: ElementRef<'_>, profile: &SiteProfile) -> JobRecord {
    let mut record = JobRecord::empty(&profile.company);

    let Some(card) = fragment.select(&SELECTORS.card).next() else {
        return record;
    };

    if let Some(department) = element_text(card, &SELECTORS.eyebrow) {
        record.department = department;
    }

    record.title = element_text(card, &SELECTORS.heading);
    record.location = location_in_copy(card);

    if let Some(anchor) = card.select(&SELECTORS.anchor).next() {
        let href = anchor.value().attr("href").unwrap_or("");
        record.job_link = Some(absolutize_href(&profile.origin, href));
        // The id comes from the href as written in the markup, not the
        // absolutized link.
        record.job_id = Some(id_from_href(href));
    }

    if let Some(posted) = element_text(card, &SELECTORS.date) {
        record.posted_date = posted;
    }

    record
}

/// Trimmed text content of the first element matching `selector`, or `None`
/// when no such element exists.
fn element_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = scope.select(selector).next()?;
    Some(element.text().collect::<String>().trim().to_string())
}

/// The location is the trimmed text node immediately following the first
/// `<br>` inside the copy block. Anything else — no copy block, no break,
/// or a non-text sibling — means the location is absent.
fn location_in_copy(card: ElementRef<'_>) -> Option<String> {
    let copy = card.select(&SELECTORS.copy).next()?;
    let line_break = copy.select(&SELECTORS.line_break).next()?;
    let sibling = line_break.next_sibling()?;
    let text = sibling.value().as_text()?;
    Some(text.trim().to_string())
}
