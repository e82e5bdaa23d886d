//! API constants and endpoint builders for the Power BI REST API

/// Default Microsoft Entra ID authority host
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Default Power BI REST API base (organization scope)
pub const DEFAULT_API_BASE_URL: &str = "https://api.powerbi.com/v1.0/myorg";

/// OAuth2 scope granting the service principal access to the Power BI API
pub const POWERBI_SCOPE: &str = "https://analysis.windows.net/powerbi/api/.default";

/// Page size used when listing workspaces
pub const LIST_PAGE_SIZE: usize = 500;

/// Upper bound on listing pages, guards against a server that ignores `$skip`
pub const MAX_LIST_PAGES: usize = 200;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("fabric-workspaces/", env!("CARGO_PKG_VERSION"));

pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Build the OAuth2 v2.0 token endpoint for a tenant
pub fn token_endpoint(authority_host: &str, tenant_id: &str) -> String {
    format!("{}/{}/oauth2/v2.0/token", trim_base(authority_host), tenant_id)
}

/// Build the workspace (group) collection endpoint
pub fn groups_endpoint(base_url: &str) -> String {
    format!("{}/groups", trim_base(base_url))
}

/// Build one page of the workspace listing
pub fn groups_page_endpoint(base_url: &str, top: usize, skip: usize) -> String {
    if skip == 0 {
        format!("{}?$top={}", groups_endpoint(base_url), top)
    } else {
        format!("{}?$top={}&$skip={}", groups_endpoint(base_url), top, skip)
    }
}

/// Build a single workspace endpoint
pub fn group_endpoint(base_url: &str, workspace_id: &str) -> String {
    format!("{}/{}", groups_endpoint(base_url), workspace_id)
}

/// Build the workspace user-assignment endpoint
pub fn group_users_endpoint(base_url: &str, workspace_id: &str) -> String {
    format!("{}/users", group_endpoint(base_url, workspace_id))
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}
