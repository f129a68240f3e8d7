//! Smart-HTTP reference discovery and upload-pack negotiation.

use crate::error::{Error, Result};
use crate::object::ObjectId;

use super::http::HttpClient;
use super::pkt;

const UPLOAD_PACK_REQUEST: &str = "application/x-git-upload-pack-request";

/// What discovery chose to fetch: the digest to `want`, and the branch ref
/// to recreate locally when the server named one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHead {
    pub id: ObjectId,
    pub refname: Option<String>,
}

/// Fetch and parse `GET <url>/info/refs?service=git-upload-pack`.
pub fn discover(http: &HttpClient, repo_url: &str) -> Result<RemoteHead> {
    let url = format!("{}/info/refs?service=git-upload-pack", repo_url);
    let body = http.get(&url)?;
    let head = choose_head(&pkt::parse(&body)?)?;
    tracing::debug!("discovered head {} ({:?})", head.id, head.refname);
    Ok(head)
}

/// Pick the head digest and branch name out of advert lines.
///
/// The digest prefers an explicit `HEAD` advert and falls back to the first
/// `refs/heads/master` / `refs/heads/main` line. The ref name comes from the
/// server's `symref=HEAD:<ref>` capability when present, otherwise from the
/// master/main preference.
fn choose_head(lines: &[Vec<u8>]) -> Result<RemoteHead> {
    let mut head_id = None;
    let mut branch = None;
    let mut symref = None;
    let mut first_advert = true;

    for line in lines {
        if line.starts_with(b"# service=") {
            continue;
        }

        let sp = match line.iter().position(|&b| b == b' ') {
            Some(sp) => sp,
            None => continue,
        };
        let id = match std::str::from_utf8(&line[..sp])
            .ok()
            .and_then(|hex| ObjectId::from_hex(hex).ok())
        {
            Some(id) => id,
            None => continue,
        };

        let rest = &line[sp + 1..];
        let nul = rest.iter().position(|&b| b == 0);
        let refname = String::from_utf8_lossy(&rest[..nul.unwrap_or(rest.len())]).to_string();

        // The capability list rides after the NUL on the first advert line.
        if first_advert {
            first_advert = false;
            if let Some(nul) = nul {
                symref = parse_symref(&rest[nul + 1..]);
            }
        }

        if refname == "HEAD" {
            head_id = Some(id);
        } else if refname == "refs/heads/master" || refname == "refs/heads/main" {
            if head_id.is_none() {
                head_id = Some(id);
            }
            branch = Some(refname);
        }
    }

    let id = head_id.ok_or_else(|| Error::Transport("remote advertised no head".to_string()))?;
    Ok(RemoteHead {
        id,
        refname: symref.or(branch),
    })
}

fn parse_symref(caps: &[u8]) -> Option<String> {
    for cap in caps.split(|&b| b == b' ') {
        if let Some(target) = cap.strip_prefix(b"symref=HEAD:") {
            return Some(String::from_utf8_lossy(target).to_string());
        }
    }
    None
}

/// Want/done negotiation: `POST <url>/git-upload-pack`, returning the raw
/// pack stream found at the literal `PACK` marker in the response.
pub fn fetch_pack(http: &HttpClient, repo_url: &str, want: &ObjectId) -> Result<Vec<u8>> {
    let mut request = pkt::frame(format!("want {}\n", want).as_bytes());
    request.extend_from_slice(pkt::FLUSH);
    request.extend_from_slice(&pkt::frame(b"done\n"));

    let url = format!("{}/git-upload-pack", repo_url);
    let response = http.post(&url, request, UPLOAD_PACK_REQUEST)?;

    let pack_start = response
        .windows(4)
        .position(|window| window == b"PACK")
        .ok_or_else(|| Error::Transport("response carries no pack stream".to_string()))?;
    Ok(response[pack_start..].to_vec())
}
