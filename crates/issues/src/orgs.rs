//! Organisation membership lookup.

use tracing::instrument;

use crate::{IssueResult, OrgName, RemoteIssueClient, Username};

/// Returns the organisations `username` belongs to, in the order the remote
/// platform lists them.
#[instrument(skip(client), fields(username = %username))]
pub async fn get_user_organisations<C: RemoteIssueClient + ?Sized>(
    client: &C,
    username: &Username,
) -> IssueResult<Vec<OrgName>> {
    client.list_orgs_for_user(username).await
}
