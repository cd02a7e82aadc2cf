//! Latest-release lookup through the hosting provider's REST API.

use serde::Deserialize;

use crate::ports::{Console, HttpClient};
use crate::remote::{HostingProvider, RemoteIdentity};

/// Subset of the release payload we care about.
#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
}

/// Tag of the latest published release of `id`, if there is one.
///
/// - 200: the `tag_name` field, or `None` if the payload lacks it.
/// - 404: the repository has tags but no releases; reported as information.
/// - anything else, or no response at all: reported as an error.
///
/// A single request is made; there are no retries.
pub async fn latest_release_tag(
    http: &dyn HttpClient,
    console: &dyn Console,
    provider: &HostingProvider,
    id: &RemoteIdentity,
) -> Option<String> {
    let url = provider.latest_release_url(id);
    tracing::debug!(%url, "looking up latest release");

    let response = match http.get(&url).await {
        Ok(response) => response,
        Err(e) => {
            console.error(&format!("Error fetching release for {id}: {e}"));
            return None;
        }
    };

    match response.status {
        200 => match serde_json::from_str::<LatestRelease>(&response.body) {
            Ok(release) => {
                if release.tag_name.is_none() {
                    console.warn(&format!("Latest release of {id} has no tag_name"));
                }
                release.tag_name
            }
            Err(e) => {
                console.error(&format!("Could not decode release metadata for {id}: {e}"));
                None
            }
        },
        404 => {
            console.info("No releases found; this repo may use tags without GitHub releases.");
            None
        }
        status => {
            console.error(&format!("Error fetching release: {status}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::capturing::CapturingConsole;
    use crate::adapters::replaying::ReplayingHttpClient;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;
    use chrono::Utc;
    use serde_json::json;

    fn acme() -> RemoteIdentity {
        RemoteIdentity { owner: "acme".into(), name: "widget".into() }
    }

    fn http_replying(status: u16, body: &str) -> ReplayingHttpClient {
        let cassette = Cassette {
            name: "release".into(),
            recorded_at: Utc::now(),
            source: "/repo".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "http".into(),
                method: "get".into(),
                input: json!({"url": "https://api.github.com/repos/acme/widget/releases/latest"}),
                output: json!({"ok": {"status": status, "body": body}}),
            }],
        };
        ReplayingHttpClient::new(CassetteReplayer::new(&cassette))
    }

    async fn resolve(http: &ReplayingHttpClient, console: &CapturingConsole) -> Option<String> {
        latest_release_tag(http, console, &HostingProvider::github(), &acme()).await
    }

    #[tokio::test]
    async fn ok_response_yields_tag() {
        let console = CapturingConsole::new();
        let http = http_replying(200, r#"{"tag_name": "v2.3.1", "name": "Widget 2.3.1"}"#);
        assert_eq!(resolve(&http, &console).await.as_deref(), Some("v2.3.1"));
        assert!(console.lines().is_empty());
    }

    #[tokio::test]
    async fn not_found_means_no_releases() {
        let console = CapturingConsole::new();
        let http = http_replying(404, r#"{"message": "Not Found"}"#);
        assert_eq!(resolve(&http, &console).await, None);
        assert!(console.contains("[info] No releases found"));
    }

    #[tokio::test]
    async fn other_status_is_reported_with_code() {
        let console = CapturingConsole::new();
        let http = http_replying(403, r#"{"message": "API rate limit exceeded"}"#);
        assert_eq!(resolve(&http, &console).await, None);
        assert!(console.contains("[error] Error fetching release: 403"));
    }

    #[tokio::test]
    async fn payload_without_tag_is_absent() {
        let console = CapturingConsole::new();
        let http = http_replying(200, r#"{"name": "untagged"}"#);
        assert_eq!(resolve(&http, &console).await, None);
        assert!(console.contains("no tag_name"));
    }
}
