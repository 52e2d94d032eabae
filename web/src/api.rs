use anyhow::{Context, Result, bail};
use flechita_protocol::{MatchStatus, SUGGEST_REPLY_PATH, SuggestRequest, SuggestResponse};
use gloo::net::http::Request;

/// Thin client over the remote matchmaking API. Paths are relative so the
/// app talks to whatever origin serves it.
pub(crate) struct ApiClient;

impl ApiClient {
    pub(crate) async fn match_status(user_id: &str) -> Result<MatchStatus> {
        let path = flechita_protocol::match_status_path(user_id);
        let response = Request::get(&path)
            .send()
            .await
            .context("match status request failed")?;
        if !response.ok() {
            bail!("match status returned {}", response.status());
        }
        response
            .json()
            .await
            .context("match status body did not parse")
    }

    pub(crate) async fn suggest_reply(request: &SuggestRequest) -> Result<SuggestResponse> {
        let response = Request::post(SUGGEST_REPLY_PATH)
            .json(request)
            .context("could not encode suggestion request")?
            .send()
            .await
            .context("suggestion request failed")?;
        if !response.ok() {
            bail!("suggestion endpoint returned {}", response.status());
        }
        response
            .json()
            .await
            .context("suggestion body did not parse")
    }
}
