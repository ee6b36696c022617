use reqwest::Url;

use crate::error::{Result, RoomQError};

/// Query parameter carrying the token back from the ticket issuer.
pub const TOKEN_PARAM: &str = "noq_t";
pub const CLIENT_PARAM: &str = "noq_c";
pub const RETURN_PARAM: &str = "noq_r";

fn is_token_pair(pair: &str) -> bool {
    pair.split('=').next() == Some(TOKEN_PARAM)
}

fn split_url(url: &str) -> (&str, Option<&str>, Option<&str>) {
    let (head, fragment) = match url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url, None),
    };
    match head.split_once('?') {
        Some((base, query)) => (base, Some(query), fragment),
        None => (head, None, fragment),
    }
}

pub fn has_token_param(url: &str) -> bool {
    let (_, query, _) = split_url(url);
    query.is_some_and(|q| q.split('&').any(is_token_pair))
}

/// Remove the token parameter from `url`, leaving everything else as written.
///
/// A URL without the parameter is returned unchanged.
pub fn strip_token(url: &str) -> String {
    if !has_token_param(url) {
        return url.to_string();
    }

    let (base, query, fragment) = split_url(url);
    let kept: Vec<&str> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && !is_token_pair(pair))
        .collect();

    let mut stripped = base.to_string();
    if !kept.is_empty() {
        stripped.push('?');
        stripped.push_str(&kept.join("&"));
    }
    if let Some(fragment) = fragment {
        stripped.push('#');
        stripped.push_str(fragment);
    }
    stripped
}

/// `<issuer>?noq_t=<token>&noq_c=<client>&noq_r=<return url without token>`.
pub fn issuer_redirect(
    issuer: &str,
    token: &str,
    client_id: &str,
    return_url: &str,
) -> Result<String> {
    let mut url =
        Url::parse(issuer).map_err(|e| RoomQError::InvalidUrl(format!("{}: {}", issuer, e)))?;
    url.query_pairs_mut()
        .append_pair(TOKEN_PARAM, token)
        .append_pair(CLIENT_PARAM, client_id)
        .append_pair(RETURN_PARAM, &strip_token(return_url));
    Ok(url.to_string())
}
