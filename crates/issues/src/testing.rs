//! In-memory [`RemoteIssueClient`] used by the unit tests in this crate.
//!
//! Every call yields to the scheduler once before touching state so sibling
//! branches of a fan-out interleave the way remote calls do.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    Comment, IssueError, IssueRef, IssueResult, Label, LabelColor, LabelName, Message, OrgName,
    RemoteIssueClient, Username,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    GetLabel(String),
    CreateLabel(String, String),
    AddLabels(Vec<String>),
    RemoveLabel(String),
    CreateComment(String),
    ListOrgs(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    GetLabel,
    CreateLabel,
    AddLabels,
    RemoveLabel,
    CreateComment,
    ListOrgs,
}

impl Call {
    fn op(&self) -> Op {
        match self {
            Call::GetLabel(_) => Op::GetLabel,
            Call::CreateLabel(..) => Op::CreateLabel,
            Call::AddLabels(_) => Op::AddLabels,
            Call::RemoveLabel(_) => Op::RemoveLabel,
            Call::CreateComment(_) => Op::CreateComment,
            Call::ListOrgs(_) => Op::ListOrgs,
        }
    }
}

#[derive(Default)]
struct State {
    repo_labels: BTreeMap<String, Label>,
    attached: BTreeSet<String>,
    comments: Vec<Comment>,
    orgs: HashMap<String, Vec<OrgName>>,
    failures: HashMap<(Op, String), IssueError>,
    calls: Vec<Call>,
    in_flight: usize,
    peak_in_flight: usize,
    in_flight_by_op: HashMap<Op, usize>,
    peak_in_flight_by_op: HashMap<Op, usize>,
}

#[derive(Default)]
pub(crate) struct FakeClient {
    state: Mutex<State>,
}

pub(crate) fn label(name: &str) -> LabelName {
    LabelName::new(name).unwrap()
}

pub(crate) fn issue() -> IssueRef {
    IssueRef::new("opencollective", "backyourstack", 7)
}

impl FakeClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_repo_labels(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for name in names {
                state.repo_labels.insert(
                    name.to_string(),
                    Label {
                        name: label(name),
                        color: LabelColor::new("00ff00").unwrap(),
                        description: None,
                    },
                );
            }
        }
        self
    }

    pub(crate) fn with_attached(self, names: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .attached
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub(crate) fn with_orgs(self, user: &str, orgs: &[&str]) -> Self {
        self.state.lock().unwrap().orgs.insert(
            user.to_string(),
            orgs.iter().map(|o| OrgName::new(*o).unwrap()).collect(),
        );
        self
    }

    /// Makes `op` fail with `error` whenever it is called with `key`.
    ///
    /// `key` is the label name or comment body the call carries.
    pub(crate) fn failing(self, op: Op, key: &str, error: IssueError) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((op, key.to_string()), error);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    pub(crate) fn repo_label_names(&self) -> Vec<String> {
        self.state.lock().unwrap().repo_labels.keys().cloned().collect()
    }

    pub(crate) fn attached(&self) -> Vec<String> {
        self.state.lock().unwrap().attached.iter().cloned().collect()
    }

    pub(crate) fn comment_bodies(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut bodies: Vec<String> = state.comments.iter().map(|c| c.body.clone()).collect();
        bodies.sort();
        bodies
    }

    /// Highest number of calls suspended at the same time.
    pub(crate) fn peak_in_flight(&self) -> usize {
        self.state.lock().unwrap().peak_in_flight
    }

    /// Highest number of calls of one kind that were outstanding at once.
    pub(crate) fn peak_in_flight_of(&self, op: Op) -> usize {
        self.state
            .lock()
            .unwrap()
            .peak_in_flight_by_op
            .get(&op)
            .copied()
            .unwrap_or(0)
    }

    async fn enter(&self, call: Call, op: Option<(Op, &str)>) -> IssueResult<()> {
        let kind = call.op();
        {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            state.in_flight += 1;
            state.peak_in_flight = state.peak_in_flight.max(state.in_flight);
            let outstanding = {
                let n = state.in_flight_by_op.entry(kind).or_default();
                *n += 1;
                *n
            };
            let peak = state.peak_in_flight_by_op.entry(kind).or_default();
            *peak = (*peak).max(outstanding);
        }
        tokio::task::yield_now().await;
        {
            let mut state = self.state.lock().unwrap();
            state.in_flight -= 1;
            if let Some(n) = state.in_flight_by_op.get_mut(&kind) {
                *n -= 1;
            }
        }
        match op {
            Some((op, key)) => match self.state.lock().unwrap().failures.get(&(op, key.to_string())) {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteIssueClient for FakeClient {
    async fn get_label(&self, _issue: &IssueRef, name: &LabelName) -> IssueResult<Label> {
        self.enter(Call::GetLabel(name.to_string()), Some((Op::GetLabel, name.as_str())))
            .await?;
        self.state
            .lock()
            .unwrap()
            .repo_labels
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| IssueError::not_found(format!("label '{name}'")))
    }

    async fn create_label(
        &self,
        _issue: &IssueRef,
        name: &LabelName,
        color: &LabelColor,
    ) -> IssueResult<Label> {
        self.enter(
            Call::CreateLabel(name.to_string(), color.to_string()),
            Some((Op::CreateLabel, name.as_str())),
        )
        .await?;
        let mut state = self.state.lock().unwrap();
        if state.repo_labels.contains_key(name.as_str()) {
            return Err(IssueError::remote(Some(422), "Validation Failed: already_exists"));
        }
        let created = Label {
            name: name.clone(),
            color: color.clone(),
            description: None,
        };
        state.repo_labels.insert(name.to_string(), created.clone());
        Ok(created)
    }

    async fn add_labels(&self, _issue: &IssueRef, labels: &[LabelName]) -> IssueResult<Vec<Label>> {
        let names: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        self.enter(Call::AddLabels(names.clone()), None).await?;
        let mut state = self.state.lock().unwrap();
        if let Some(err) = names
            .iter()
            .find_map(|n| state.failures.get(&(Op::AddLabels, n.clone())))
        {
            return Err(err.clone());
        }
        state.attached.extend(names);
        Ok(state
            .attached
            .iter()
            .filter_map(|n| state.repo_labels.get(n).cloned())
            .collect())
    }

    async fn remove_label(&self, _issue: &IssueRef, name: &LabelName) -> IssueResult<()> {
        self.enter(Call::RemoveLabel(name.to_string()), Some((Op::RemoveLabel, name.as_str())))
            .await?;
        if self.state.lock().unwrap().attached.remove(name.as_str()) {
            Ok(())
        } else {
            Err(IssueError::not_found(format!("label '{name}' on issue")))
        }
    }

    async fn create_comment(&self, _issue: &IssueRef, body: &Message) -> IssueResult<Comment> {
        self.enter(
            Call::CreateComment(body.to_string()),
            Some((Op::CreateComment, body.as_str())),
        )
        .await?;
        let mut state = self.state.lock().unwrap();
        let comment = Comment {
            id: state.comments.len() as u64 + 1,
            body: body.to_string(),
            html_url: None,
            created_at: None,
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_orgs_for_user(&self, username: &Username) -> IssueResult<Vec<OrgName>> {
        self.enter(Call::ListOrgs(username.to_string()), None).await?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .orgs
            .get(username.as_str())
            .cloned()
            .unwrap_or_default())
    }
}
