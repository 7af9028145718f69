use http::{Request, Response};
use hyper::{client::HttpConnector, Body};
use hyper_tls::HttpsConnector;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::FetchError;

/// Characters escaped when a short code is placed in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn lookup_url(hosts_url: &str, short_code: &str) -> String {
    format!(
        "{}{}",
        hosts_url,
        utf8_percent_encode(short_code, PATH_SEGMENT)
    )
}

pub struct Client(hyper::Client<HttpsConnector<HttpConnector>, Body>);

impl Client {
    pub async fn request(&self, req: Request<Body>) -> Result<Response<Body>, FetchError> {
        let resp = self.0.request(req).await?;
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(FetchError::Status(resp.status().as_u16()))
        }
    }

    pub async fn get(&self, url: &str) -> Result<Response<Body>, FetchError> {
        let request = Request::builder()
            .uri(url)
            .method("GET")
            .header("User-Agent", "hyper/0.14")
            .body(Body::empty())?;
        self.request(request).await
    }
}

impl Default for Client {
    fn default() -> Client {
        let https = HttpsConnector::new();
        let client = hyper::Client::builder()
            .http1_title_case_headers(true)
            .build(https);
        Client(client)
    }
}
