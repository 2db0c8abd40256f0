use serde::{Deserialize, Serialize};

/// Parameters submitted alongside a job: which agents process it and which
/// uploaded files belong to it. Serialized as YAML and uploaded to the job
/// as `{job_id}.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobParams {
    /// Agent names, in the order they should run.
    pub agents: Vec<String>,
    /// Base names of the successfully uploaded input files.
    #[serde(default)]
    pub files: Vec<String>,
    /// Optional storage prefix. Omitted from the file entirely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl JobParams {
    /// Start an empty parameter record for the given agents. An empty prefix
    /// is treated as unset.
    pub fn new(agents: Vec<String>, prefix: Option<String>) -> Self {
        Self {
            agents,
            files: Vec::new(),
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    /// The descriptor's file name for a job.
    pub fn file_name(job_id: &str) -> String {
        format!("{job_id}.yaml")
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }
}
