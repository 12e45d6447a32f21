use super::{LinkSource, Portal, PortalDescriptor, SearchRoute};

pub const BASE_URL: &str = "https://do.mifuturoempleo.com";

// The portal answers bot-looking modern UAs with a challenge page; a legacy
// MSIE string gets the plain server-rendered listing.
const USER_AGENT: &str = "Mozilla/4.0 (compatible; MSIE 6.1; Windows XP)";

pub fn descriptor(base_url: &str) -> PortalDescriptor {
    PortalDescriptor {
        portal: Portal::MiFuturo,
        base_url: base_url.trim_end_matches('/').to_string(),
        search: SearchRoute::PathSlug {
            prefix: "/empleos/de-",
        },
        user_agent: USER_AGENT,
        listing_selector: r#"a[href*="/oferta-de-empleo/"]"#,
        title_selectors: &["h2"],
        link: LinkSource::Container,
        company_selectors: &["p"],
    }
}
