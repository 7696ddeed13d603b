use chrono::{Duration, NaiveDate};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::FeedConfig;
use crate::error::UpstreamError;
use crate::feed::RawFeedPage;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fetches the whole `[start, end]` window (inclusive, order-insensitive) as
/// one merged page, walking the upstream pagination one bounded request at a
/// time. Any failed request aborts the aggregation.
pub async fn aggregate(
    client: &Client,
    config: &FeedConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RawFeedPage, UpstreamError> {
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    info!(%start, %end, "aggregating feed window");

    let mut merged = RawFeedPage::default();
    let mut current_start = start;
    let mut pages = 0usize;

    loop {
        if pages >= config.max_iterations {
            warn!(pages, next = %current_start, "feed aggregation hit the iteration bound");
            break;
        }
        let current_end = window_end(config, current_start, end);
        let page = fetch_page(client, config, current_start, current_end).await?;
        pages += 1;

        let next = page.links.next.clone();
        debug!(
            page = pages,
            from = %current_start,
            to = %current_end,
            elements = page.element_count,
            "merging feed page"
        );
        merged.merge(page);

        let Some(next) = next else {
            break;
        };
        match next_start_date(&next) {
            Some(next_start) if next_start > end => {
                debug!(%next_start, %end, "next page starts past the requested window");
                break;
            }
            Some(next_start) => current_start = next_start,
            None => {
                warn!(link = %next, "next link has no usable start_date, stopping");
                break;
            }
        }
    }

    info!(
        pages,
        elements = merged.element_count,
        dates = merged.near_earth_objects.len(),
        "feed window aggregated"
    );
    Ok(merged)
}

/// Last day of a request starting at `start`: capped by the span limit and
/// by the overall window end.
pub fn window_end(config: &FeedConfig, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let capped = start
        .checked_add_signed(Duration::days(config.span_offset_days()))
        .unwrap_or(end);
    capped.min(end)
}

pub async fn fetch_page(
    client: &Client,
    config: &FeedConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RawFeedPage, UpstreamError> {
    let url = feed_url(config, start, end)?;
    let mut request = client.get(url);
    if let Some(timeout) = config.request_timeout() {
        request = request.timeout(timeout);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), %start, %end, "feed request rejected");
        return Err(UpstreamError::from_status(status));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn feed_url(config: &FeedConfig, start: NaiveDate, end: NaiveDate) -> Result<Url, UpstreamError> {
    let mut url = Url::parse(&config.endpoint)?;
    url.query_pairs_mut()
        .append_pair("start_date", &start.format(DATE_FORMAT).to_string())
        .append_pair("end_date", &end.format(DATE_FORMAT).to_string())
        .append_pair("api_key", &config.api_key);
    Ok(url)
}

/// The `start_date` query parameter of a pagination link.
pub fn next_start_date(link: &str) -> Option<NaiveDate> {
    let url = Url::parse(link).ok()?;
    let (_, value) = url.query_pairs().find(|(key, _)| key == "start_date")?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT).ok()
}
