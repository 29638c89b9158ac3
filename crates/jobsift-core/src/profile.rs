use crate::error::AppError;
use crate::models::origin_of;

/// CSS class whose presence signals that a results page has rendered its
/// card grid. The browser session waits for this before reading the DOM.
pub const MARKER_SELECTOR: &str = ".bx--card";

/// Accessible-label selector for the pagination control.
pub const NEXT_BUTTON_SELECTOR: &str = r#"button[aria-label="Next Page"]"#;

/// Identity of the site a crawler instance targets: the fixed company label
/// stamped on every record and the origin used to absolutize relative hrefs.
///
/// Element selectors are deliberately not part of the profile — they are
/// fixed for the card markup this crawler understands (see `extract`).
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub company: String,
    pub origin: String,
}

impl SiteProfile {
    /// Build a profile for `company`, deriving the link origin from the
    /// search base URL.
    pub fn new(company: &str, base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            company: company.to_string(),
            origin: origin_of(base_url)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_base_url() {
        let profile =
            SiteProfile::new("IBM", "https://www.ibm.com/in-en/careers/search?job-search=jobs")
                .unwrap();
        assert_eq!(profile.company, "IBM");
        assert_eq!(profile.origin, "https://www.ibm.com");
    }

    #[test]
    fn test_profile_rejects_bad_url() {
        assert!(SiteProfile::new("IBM", "::nope::").is_err());
    }
}
