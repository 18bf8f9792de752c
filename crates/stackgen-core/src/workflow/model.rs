//! Declarative job-graph model for CI workflows.
//!
//! Models only the subset of the workflow schema the generator emits.
//! Serialized field names follow the external schema exactly; condition
//! predicates are attached as opaque text and never interpreted here.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{StackgenError, StackgenResult};

/// Insertion-ordered string map. The CI runner does not care about
/// ordering, but humans reading the rendered file do, so jobs and step
/// parameters are reproduced exactly as configured.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap<T>(Vec<(String, T)>);

impl<T> OrderedMap<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        self.0.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T, K: Into<String>> FromIterator<(K, T)> for OrderedMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A complete workflow definition: trigger configuration plus the job
/// graph.
#[derive(Debug, Clone, Serialize)]
pub struct Workflow {
    pub name: String,
    pub on: Triggers,
    pub jobs: OrderedMap<Job>,
}

impl Workflow {
    /// Check the graph invariant: every `needs` edge must reference a job
    /// defined in this workflow.
    pub fn validate(&self) -> StackgenResult<()> {
        for (id, job) in self.jobs.iter() {
            for dependency in &job.needs {
                if self.jobs.get(dependency).is_none() {
                    return Err(StackgenError::UnknownJobDependency {
                        job: id.to_string(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Events that start the workflow.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Triggers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<PushTrigger>,
}

/// Empty mapping: matches every pull request event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PullRequestTrigger {}

#[derive(Debug, Clone, Serialize)]
pub struct PushTrigger {
    pub branches: Vec<String>,
}

/// One node of the job graph. A job with no `condition` always runs when
/// its dependencies succeed.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    #[serde(rename = "runs-on")]
    pub runs_on: Vec<String>,
    pub permissions: Permissions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<String>,
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub steps: Vec<Step>,
}

/// Elevated scopes granted to a job. Only the two scopes cloud
/// authentication needs are ever granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub contents: AccessLevel,
    #[serde(rename = "id-token")]
    pub id_token: AccessLevel,
}

impl Permissions {
    /// Repository content write plus federated-identity token write.
    pub fn cloud_auth() -> Self {
        Self {
            contents: AccessLevel::Write,
            id_token: AccessLevel::Write,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Read,
    Write,
}

/// One step of a job. Order is significant and reproduced exactly.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub with: OrderedMap<String>,
    #[serde(skip_serializing_if = "OrderedMap::is_empty")]
    pub env: OrderedMap<String>,
}

impl Step {
    /// A step invoking an external action.
    pub fn uses(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            condition: None,
            uses: Some(action.into()),
            run: None,
            with: OrderedMap::new(),
            env: OrderedMap::new(),
        }
    }

    /// A step running an inline shell command.
    pub fn run(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            condition: None,
            uses: None,
            run: Some(command.into()),
            with: OrderedMap::new(),
            env: OrderedMap::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach a condition predicate, passed through to the runner
    /// unmodified.
    pub fn condition(mut self, predicate: impl Into<String>) -> Self {
        self.condition = Some(predicate.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with.insert(key, value.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key, value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_job(needs: Vec<String>) -> Job {
        Job {
            runs_on: vec!["ubuntu-latest".into()],
            permissions: Permissions::cloud_auth(),
            needs,
            condition: None,
            steps: vec![Step::run("Noop", "true")],
        }
    }

    #[test]
    fn test_validate_accepts_defined_dependencies() {
        let mut jobs = OrderedMap::new();
        jobs.insert("test", minimal_job(vec![]));
        jobs.insert("deploy", minimal_job(vec!["test".into()]));
        let workflow = Workflow {
            name: "ci-cd".into(),
            on: Triggers::default(),
            jobs,
        };
        assert!(workflow.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_dependency() {
        let mut jobs = OrderedMap::new();
        jobs.insert("deploy", minimal_job(vec!["test".into()]));
        let workflow = Workflow {
            name: "ci-cd".into(),
            on: Triggers::default(),
            jobs,
        };
        let err = workflow.validate().unwrap_err();
        assert!(matches!(
            err,
            StackgenError::UnknownJobDependency { ref job, ref dependency }
                if job == "deploy" && dependency == "test"
        ));
    }

    #[test]
    fn test_schema_field_names() {
        let job = Job {
            runs_on: vec!["ubuntu-latest".into()],
            permissions: Permissions::cloud_auth(),
            needs: vec![],
            condition: Some("always()".into()),
            steps: vec![Step::uses("Checkout", "actions/checkout@v4")
                .with("fetch-depth", "0")],
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["runs-on"][0], "ubuntu-latest");
        assert_eq!(value["if"], "always()");
        assert_eq!(value["permissions"]["contents"], "write");
        assert_eq!(value["permissions"]["id-token"], "write");
        assert_eq!(value["steps"][0]["uses"], "actions/checkout@v4");
        assert_eq!(value["steps"][0]["with"]["fetch-depth"], "0");
        // Empty needs and unset keys stay out of the document.
        assert!(value.get("needs").is_none());
        assert!(value["steps"][0].get("run").is_none());
        assert!(value["steps"][0].get("env").is_none());
    }

    #[test]
    fn test_ordered_map_preserves_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        let yaml = serde_yaml::to_string(&map).unwrap();
        assert!(yaml.find("zeta").unwrap() < yaml.find("alpha").unwrap());
    }

    #[test]
    fn test_pull_request_trigger_renders_as_empty_mapping() {
        let triggers = Triggers {
            pull_request: Some(PullRequestTrigger::default()),
            push: Some(PushTrigger {
                branches: vec!["main".into()],
            }),
        };
        let yaml = serde_yaml::to_string(&triggers).unwrap();
        assert!(yaml.contains("pull_request: {}"));
        assert!(yaml.contains("branches:"));
    }
}
