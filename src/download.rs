use crate::error::{InstallError, Result};
use futures_util::StreamExt;
use reqwest::header::LOCATION;
use reqwest::{Client, Response, StatusCode, Url};

/// Hops followed before a redirect chain is given up on.
pub const MAX_REDIRECTS: usize = 10;

/// Client with automatic redirects disabled; [`fetch`] follows them itself.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(concat!("monospace-installer/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// GET `url`, following `Location` headers up to [`MAX_REDIRECTS`] times.
///
/// The returned response has status 200 and an unread body. Any other final
/// status is an [`InstallError::HttpFailure`]; nothing is retried.
pub async fn fetch(client: &Client, url: &str) -> Result<Response> {
    let mut redirects = 0;
    let mut response = client.get(url).send().await?;

    while let Some(next) = redirect_target(&response)? {
        if redirects == MAX_REDIRECTS {
            return Err(InstallError::TooManyRedirects {
                url: url.to_string(),
                limit: MAX_REDIRECTS,
            });
        }
        redirects += 1;
        tracing::debug!(
            "Redirect {}/{}: {} -> {}",
            redirects,
            MAX_REDIRECTS,
            response.url(),
            next
        );
        response = client.get(next).send().await?;
    }

    let status = response.status();
    if status != StatusCode::OK {
        let reason = status.canonical_reason().unwrap_or("").to_string();
        tracing::error!("{} {}", status.as_u16(), reason);
        return Err(InstallError::HttpFailure {
            url: response.url().to_string(),
            status: status.as_u16(),
            reason,
        });
    }

    Ok(response)
}

fn redirect_target(response: &Response) -> Result<Option<Url>> {
    let Some(location) = response.headers().get(LOCATION) else {
        return Ok(None);
    };

    let invalid = || InstallError::InvalidRedirect {
        url: response.url().to_string(),
        location: String::from_utf8_lossy(location.as_bytes()).to_string(),
    };

    let location = location.to_str().map_err(|_| invalid())?;
    // Relative locations are resolved against the URL that sent them.
    response
        .url()
        .join(location)
        .map(Some)
        .map_err(|_| invalid())
}

/// Upper bound on what a `Content-Length` header may pre-allocate.
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

fn initial_capacity(content_length: Option<u64>) -> usize {
    content_length.unwrap_or(0).min(MAX_PREALLOCATION) as usize
}

/// Drain a response into one contiguous buffer.
pub async fn read_body(response: Response) -> Result<Vec<u8>> {
    let mut body = Vec::with_capacity(initial_capacity(response.content_length()));
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }

    Ok(body)
}
