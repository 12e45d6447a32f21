use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{
    COMPANY_NOT_SPECIFIED, LinkSource, ListingKind, ListingRecord, Portal, PortalDescriptor,
    SearchRoute, SiteAdapter, SourceError, UNRESOLVED_LINK,
};

/// Characters that encodeURIComponent does NOT encode.
/// RFC 3986 unreserved: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const ENCODE_URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

struct CompiledRules {
    listing: Selector,
    titles: Vec<Selector>,
    companies: Vec<Selector>,
}

/// Generic HTML adapter driven entirely by a `PortalDescriptor`.
pub struct DescriptorAdapter {
    descriptor: PortalDescriptor,
    rules: CompiledRules,
    base: Url,
    client: reqwest::Client,
}

impl DescriptorAdapter {
    /// Compile the descriptor's selectors and build a client carrying the
    /// portal's own User-Agent.
    pub fn new(descriptor: PortalDescriptor) -> Result<Self, SourceError> {
        let portal = descriptor.portal;
        let parse_error = |message: String| SourceError::Parse { portal, message };

        let rules = CompiledRules {
            listing: compile(descriptor.listing_selector).map_err(parse_error)?,
            titles: compile_all(descriptor.title_selectors).map_err(parse_error)?,
            companies: compile_all(descriptor.company_selectors).map_err(parse_error)?,
        };

        let base = Url::parse(&descriptor.base_url).map_err(|e| {
            parse_error(format!("invalid base URL '{}': {e}", descriptor.base_url))
        })?;

        let client = reqwest::Client::builder()
            .user_agent(descriptor.user_agent)
            .build()
            .map_err(|e| SourceError::Fetch {
                portal,
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            descriptor,
            rules,
            base,
            client,
        })
    }

    /// Build the portal search URL for a query term.
    pub fn search_url(&self, query: &str) -> String {
        let base = &self.descriptor.base_url;
        match &self.descriptor.search {
            SearchRoute::QueryString { path, param, extra } => {
                let mut url = format!("{base}{path}?{param}={}", urlencoded(query));
                for (key, value) in extra.iter() {
                    url.push('&');
                    url.push_str(key);
                    url.push('=');
                    url.push_str(&urlencoded(value));
                }
                url
            }
            SearchRoute::PathSlug { prefix } => {
                format!("{base}{prefix}{}", urlencoded(&slugify(query)))
            }
        }
    }

    /// Turn a portal result page into listing records. Containers without a
    /// title are skipped; a page with no usable container yields an empty
    /// list plus a diagnostic event.
    pub fn parse_listings(&self, html: &str) -> Vec<ListingRecord> {
        let portal = self.descriptor.portal;
        let document = Html::parse_document(html);

        let mut containers = 0usize;
        let mut listings = Vec::new();

        for container in document.select(&self.rules.listing) {
            containers += 1;

            let Some((title, title_element)) = first_text(container, &self.rules.titles) else {
                continue;
            };

            let href = match self.descriptor.link {
                LinkSource::TitleElement => title_element.value().attr("href"),
                LinkSource::Container => container.value().attr("href"),
            };

            let company = first_text(container, &self.rules.companies)
                .map(|(text, _)| text)
                .unwrap_or_else(|| COMPANY_NOT_SPECIFIED.to_string());

            listings.push(ListingRecord {
                title,
                link: resolve_link(&self.base, href),
                company,
                source: portal,
                kind: ListingKind::External,
            });
        }

        let skipped = containers - listings.len();
        if listings.is_empty() {
            tracing::info!(
                portal = %portal,
                containers,
                skipped,
                "No listings matched portal markup"
            );
        } else if skipped > 0 {
            tracing::debug!(portal = %portal, skipped, "Skipped listing containers without a title");
        }

        listings
    }
}

#[async_trait]
impl SiteAdapter for DescriptorAdapter {
    fn portal(&self) -> Portal {
        self.descriptor.portal
    }

    async fn fetch_listings(&self, query: &str) -> Result<Vec<ListingRecord>, SourceError> {
        let portal = self.descriptor.portal;
        let fetch_error = |message: String| SourceError::Fetch { portal, message };

        let url = self.search_url(query);
        tracing::debug!(portal = %portal, %url, "Fetching portal listings");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(fetch_error(format!("returned {}", resp.status())));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| fetch_error(format!("failed to read body: {e}")))?;

        let listings = self.parse_listings(&body);
        tracing::debug!(portal = %portal, count = listings.len(), "Parsed portal listings");
        Ok(listings)
    }
}

fn compile(selector: &str) -> Result<Selector, String> {
    Selector::parse(selector).map_err(|e| format!("'{selector}': {e:?}"))
}

fn compile_all(selectors: &[&str]) -> Result<Vec<Selector>, String> {
    selectors.iter().map(|s| compile(s)).collect()
}

/// First non-empty trimmed text under `container`, trying selectors in order.
fn first_text<'a>(
    container: ElementRef<'a>,
    selectors: &[Selector],
) -> Option<(String, ElementRef<'a>)> {
    selectors.iter().find_map(|selector| {
        container.select(selector).find_map(|element| {
            let text = element.text().collect::<String>();
            let text = text.trim();
            (!text.is_empty()).then(|| (text.to_string(), element))
        })
    })
}

/// Absolute http(s) URL for `href`, or the unresolved marker.
fn resolve_link(base: &Url, href: Option<&str>) -> String {
    href.map(str::trim)
        .filter(|h| !h.is_empty())
        .and_then(|h| base.join(h).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
        .unwrap_or_else(|| UNRESOLVED_LINK.to_string())
}

/// Lowercase the query and join its words with hyphens.
fn slugify(query: &str) -> String {
    query
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn urlencoded(s: &str) -> String {
    utf8_percent_encode(s, ENCODE_URI_COMPONENT_SET).to_string()
}
