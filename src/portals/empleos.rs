use super::{LinkSource, Portal, PortalDescriptor, SearchRoute};

pub const BASE_URL: &str = "https://empleos.net";

/// Empleos.net serves its search page only to current desktop browsers.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Country filter sent with every search.
const COUNTRY_CODE: &str = "6";

pub fn descriptor(base_url: &str) -> PortalDescriptor {
    PortalDescriptor {
        portal: Portal::Empleos,
        base_url: base_url.trim_end_matches('/').to_string(),
        search: SearchRoute::QueryString {
            path: "/buscar_vacantes.php",
            param: "Claves",
            extra: &[("Area", ""), ("Pais", COUNTRY_CODE)],
        },
        user_agent: USER_AGENT,
        listing_selector: ".g-brd-around.g-brd-gray-light-v4",
        title_selectors: &["a.u-link-v5.color-gray-dark-v1", "a.u-link-v5.fs-16.fw-8"],
        link: LinkSource::TitleElement,
        company_selectors: &["a.u-link-v5.color-primary--hover"],
    }
}
