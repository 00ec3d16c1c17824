use serde::Deserialize;

// Missing text fields read as empty strings.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    #[serde(default)]
    pub description: String,
    pub executor: Option<String>,
}

impl NewTaskForm {
    // An empty executor field means "nobody". Anything else is kept verbatim.
    pub fn executor(&self) -> Option<String> {
        self.executor.clone().filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskIdForm {
    #[serde(rename = "taskId")]
    pub task_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_executor_is_none() {
        let form = NewTaskForm { description: "x".into(), executor: Some("".into()) };
        assert_eq!(form.executor(), None);

        let form = NewTaskForm { description: "x".into(), executor: None };
        assert_eq!(form.executor(), None);

        let form = NewTaskForm { description: "x".into(), executor: Some("bob".into()) };
        assert_eq!(form.executor().as_deref(), Some("bob"));

        let form = NewTaskForm { description: "x".into(), executor: Some(" bob ".into()) };
        assert_eq!(form.executor().as_deref(), Some(" bob "));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let form: CredentialsForm = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(form.password, "");

        let form: NewTaskForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.description, "");
        assert_eq!(form.executor(), None);
    }
}
