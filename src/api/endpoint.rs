pub type Endpoint = str;

pub const MEMBER_DATA: &Endpoint = "/rest/member_data/";

/* Upstream serves its generic member API differently depending on the client
signature; these headers must stay byte-identical to a real browser's. */
pub const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";
pub const ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.9";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";
