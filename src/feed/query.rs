//! Search filters for the job feed
//!
//! Each filter accepts the human spelling used in configuration
//! (`"past month"`, `"full time"`, `"recent"`) and knows the parameter value
//! the LinkedIn guest endpoint expects.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of postings requested per feed page
pub const PAGE_SIZE: u32 = 10;

/// A filter value that is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownFilter {
    kind: &'static str,
    value: String,
}

impl UnknownFilter {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Normalize a filter spelling: lowercase, `-`/`_` treated as spaces
fn canonical(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .replace(['-', '_'], " ")
}

/// Recency window of the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePosted {
    PastMonth,
    PastWeek,
    PastDay,
}

impl DatePosted {
    /// Value of the `f_TPR` parameter
    pub fn param(self) -> &'static str {
        match self {
            DatePosted::PastMonth => "r2592000",
            DatePosted::PastWeek => "r604800",
            DatePosted::PastDay => "r86400",
        }
    }
}

impl FromStr for DatePosted {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "past month" => Ok(DatePosted::PastMonth),
            "past week" => Ok(DatePosted::PastWeek),
            "24hr" | "past 24 hours" | "past day" => Ok(DatePosted::PastDay),
            _ => Err(UnknownFilter::new("date since posted", s)),
        }
    }
}

/// Employment type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Volunteer,
    Internship,
}

impl JobType {
    /// Value of the `f_JT` parameter
    pub fn param(self) -> &'static str {
        match self {
            JobType::FullTime => "F",
            JobType::PartTime => "P",
            JobType::Contract => "C",
            JobType::Temporary => "T",
            JobType::Volunteer => "V",
            JobType::Internship => "I",
        }
    }
}

impl FromStr for JobType {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "full time" => Ok(JobType::FullTime),
            "part time" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "temporary" => Ok(JobType::Temporary),
            "volunteer" => Ok(JobType::Volunteer),
            "internship" => Ok(JobType::Internship),
            _ => Err(UnknownFilter::new("job type", s)),
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Recent,
    Relevant,
}

impl SortBy {
    /// Value of the `sortBy` parameter
    pub fn param(self) -> &'static str {
        match self {
            SortBy::Recent => "DD",
            SortBy::Relevant => "R",
        }
    }
}

impl FromStr for SortBy {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "recent" => Ok(SortBy::Recent),
            "relevant" => Ok(SortBy::Relevant),
            _ => Err(UnknownFilter::new("sort order", s)),
        }
    }
}

/// Fixed filters of a job search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub location: String,
    pub date_since_posted: DatePosted,
    pub job_type: JobType,
    pub sort_by: SortBy,
    pub limit: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keyword: "php".to_string(),
            location: "Germany".to_string(),
            date_since_posted: DatePosted::PastMonth,
            job_type: JobType::FullTime,
            sort_by: SortBy::Recent,
            limit: PAGE_SIZE,
        }
    }
}

impl SearchQuery {
    /// Query parameters for the given 0-based page
    pub fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(6);
        if !self.keyword.is_empty() {
            params.push(("keywords", self.keyword.clone()));
        }
        if !self.location.is_empty() {
            params.push(("location", self.location.clone()));
        }
        params.push(("f_TPR", self.date_since_posted.param().to_string()));
        params.push(("f_JT", self.job_type.param().to_string()));
        params.push(("sortBy", self.sort_by.param().to_string()));
        params.push(("start", page.saturating_mul(self.limit).to_string()));
        params
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' in {}", self.keyword, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        assert_eq!("past Month".parse::<DatePosted>().unwrap(), DatePosted::PastMonth);
        assert_eq!("24hr".parse::<DatePosted>().unwrap(), DatePosted::PastDay);
        assert_eq!("full time".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("Full-Time".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("recent".parse::<SortBy>().unwrap(), SortBy::Recent);
    }

    #[test]
    fn test_unknown_filter() {
        let err = "fortnightly".parse::<DatePosted>().unwrap_err();
        assert_eq!(err.to_string(), "unknown date since posted 'fortnightly'");
    }

    #[test]
    fn test_params_for_page() {
        let query = SearchQuery::default();
        let params = query.params(2);

        assert!(params.contains(&("keywords", "php".to_string())));
        assert!(params.contains(&("location", "Germany".to_string())));
        assert!(params.contains(&("f_TPR", "r2592000".to_string())));
        assert!(params.contains(&("f_JT", "F".to_string())));
        assert!(params.contains(&("sortBy", "DD".to_string())));
        assert!(params.contains(&("start", "20".to_string())));
    }

    #[test]
    fn test_start_offset_saturates() {
        let params = SearchQuery::default().params(u32::MAX);
        assert!(params.contains(&("start", u32::MAX.to_string())));
    }
}
