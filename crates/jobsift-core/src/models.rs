use url::Url;

use crate::error::AppError;

/// Placeholder used where the source page omits a labelled field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// One job listing extracted from a results-page card.
///
/// Field order is the CSV column order: title, company, department, location,
/// posted_date, job_link, job_id. Fields degrade independently — a missing
/// sub-element leaves its field at the default without rejecting the record.
/// Only a missing `title` causes the record to be dropped, and that happens
/// in the pagination driver, not here.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct JobRecord {
    /// Listing heading. `None` when the heading element is absent; such
    /// records are discarded by the driver.
    pub title: Option<String>,
    /// Fixed label for the organization this crawler instance targets.
    pub company: String,
    /// Category eyebrow shown above the title; [`NOT_SPECIFIED`] when absent.
    pub department: String,
    /// Free-text location parsed out of the card copy block.
    pub location: Option<String>,
    /// Free-text date label; [`NOT_SPECIFIED`] when absent.
    pub posted_date: String,
    /// Absolute URL of the listing detail page.
    pub job_link: Option<String>,
    /// Final path segment of the original (pre-absolutization) href.
    pub job_id: Option<String>,
}

impl JobRecord {
    /// An all-default record for the given company: the shape returned when a
    /// fragment has no card container at all.
    pub fn empty(company: &str) -> Self {
        Self {
            title: None,
            company: company.to_string(),
            department: NOT_SPECIFIED.to_string(),
            location: None,
            posted_date: NOT_SPECIFIED.to_string(),
            job_link: None,
            job_id: None,
        }
    }

    /// True when the record carries a usable title and should be kept.
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Turn a card href into an absolute link: site-relative paths get the site
/// origin prefixed, anything else passes through unchanged.
pub fn absolutize_href(origin: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        href.to_string()
    }
}

/// The listing id is the substring after the last `/` of the href as it
/// appears in the markup, before any absolutization.
pub fn id_from_href(href: &str) -> String {
    href.rsplit('/').next().unwrap_or(href).to_string()
}

/// Derive the `scheme://host` origin used for absolutizing relative hrefs
/// from the configured base URL.
///
/// Example: `https://www.ibm.com/in-en/careers/search?job-search=jobs`
/// → `https://www.ibm.com`
pub fn origin_of(base_url: &str) -> Result<String, AppError> {
    let parsed = Url::parse(base_url)
        .map_err(|e| AppError::Generic(format!("Invalid base URL {base_url}: {e}")))?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return Err(AppError::Generic(format!(
            "Base URL {base_url} has no usable origin"
        )));
    }
    Ok(origin.ascii_serialization())
}
